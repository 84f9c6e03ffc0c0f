//! Tests for the text command language.

use polyboard::{CommandError, Input, UserCommand, VariantChoice};

fn command(line: &str) -> UserCommand {
    match Input::parse(line) {
        Ok(Some(Input::Command(command))) => command,
        other => panic!("expected a command from {line:?}, got {other:?}"),
    }
}

#[test]
fn test_plain_text_is_a_move() {
    assert_eq!(
        Input::parse("  b2 ").unwrap(),
        Some(Input::Move("b2".to_string()))
    );
    assert_eq!(Input::parse("pass").unwrap(), Some(Input::Move("pass".to_string())));
    assert_eq!(Input::parse("   ").unwrap(), None);
}

#[test]
fn test_commands() {
    assert_eq!(command(":new"), UserCommand::NewGame);
    assert_eq!(command(":HINT"), UserCommand::Hint);
    assert_eq!(command(":go"), UserCommand::Go);
    assert_eq!(command(":variants"), UserCommand::ListVariants);
    assert_eq!(command(":q"), UserCommand::Quit);
    assert_eq!(command(":depth 7"), UserCommand::Depth(7));
    assert_eq!(command(":time 10"), UserCommand::Time(10));
    assert_eq!(command(":variant 2"), UserCommand::Variant(VariantChoice::Index(2)));
    assert_eq!(
        command(":variant Connect 4"),
        UserCommand::Variant(VariantChoice::Name("Connect 4".to_string()))
    );
}

#[test]
fn test_command_errors() {
    assert_eq!(
        Input::parse(":castle").unwrap_err(),
        CommandError::Unknown {
            name: "castle".to_string()
        }
    );
    assert!(matches!(
        Input::parse(":depth").unwrap_err(),
        CommandError::MissingArgument { command: "depth", .. }
    ));
    assert_eq!(
        Input::parse(":time soon").unwrap_err().to_string(),
        ":time expects a whole number, got 'soon'."
    );
    assert_eq!(
        Input::parse(":hint now").unwrap_err().to_string(),
        ":hint takes no arguments."
    );
    assert!(matches!(
        Input::parse(":variant").unwrap_err(),
        CommandError::MissingArgument { command: "variant", .. }
    ));
}
