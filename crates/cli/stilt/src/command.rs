//! Session-script command parsing
//!
//! One line, one command. The first whitespace-separated token selects the
//! command, the rest are its parameters. Malformed lines are rejected here
//! with transcript-ready wording, before they can reach the symbol table.

use thiserror::Error;

/// One parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `I <name> <kind> [detail..]`: declare a symbol in the current scope.
    ///
    /// `FUNCTION` detail is a return type followed by parameter types;
    /// `STRUCT` and `UNION` detail is type/name pairs. Both are folded
    /// into the descriptor here, so the engine never sees raw tokens.
    Insert {
        /// Symbol name.
        name: String,
        /// Classification tag, stored verbatim.
        kind: String,
        /// Pre-rendered descriptor, when the declaration carries detail.
        descriptor: Option<String>,
    },
    /// `L <name>`: resolve a name through the scope stack.
    Lookup {
        /// Name to resolve.
        name: String,
    },
    /// `D <name>`: delete a name from the current scope.
    Delete {
        /// Name to delete.
        name: String,
    },
    /// `P C`: print the current scope.
    PrintCurrent,
    /// `P A`: print every live scope, innermost first.
    PrintAll,
    /// `S`: enter a new scope.
    EnterScope,
    /// `E`: exit the current scope.
    ExitScope,
    /// `Q`: shut the session down.
    Quit,
}

/// Rejection of a malformed line. The `Display` text is exactly what the
/// transcript prints for the line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Wrong number of parameters for an otherwise known command.
    #[error("Number of parameters mismatch for the command {0}")]
    ParameterMismatch(char),
    /// Right arity, unusable parameter value.
    #[error("Invalid parameter for the command {0}")]
    InvalidParameter(char),
    /// The leading token is not a command letter.
    #[error("Unrecognized command {0}")]
    Unrecognized(String),
}

/// Parses one script line. Blank lines are the caller's concern.
///
/// # Errors
///
/// Rejects unknown commands, arity mistakes, and unusable parameters.
pub fn parse_line(line: &str) -> Result<Command, CommandError> {
    let mut tokens = line.split_whitespace();
    let head = tokens.next().unwrap_or_default();
    let rest: Vec<&str> = tokens.collect();

    match head {
        "I" => parse_insert(&rest),
        "L" => match rest.as_slice() {
            [name] => Ok(Command::Lookup {
                name: (*name).to_owned(),
            }),
            _ => Err(CommandError::ParameterMismatch('L')),
        },
        "D" => match rest.as_slice() {
            [name] => Ok(Command::Delete {
                name: (*name).to_owned(),
            }),
            _ => Err(CommandError::ParameterMismatch('D')),
        },
        "P" => match rest.as_slice() {
            ["C"] => Ok(Command::PrintCurrent),
            ["A"] => Ok(Command::PrintAll),
            [_] => Err(CommandError::InvalidParameter('P')),
            _ => Err(CommandError::ParameterMismatch('P')),
        },
        "S" => bare('S', &rest, Command::EnterScope),
        "E" => bare('E', &rest, Command::ExitScope),
        "Q" => bare('Q', &rest, Command::Quit),
        other => Err(CommandError::Unrecognized(other.to_owned())),
    }
}

/// Commands that take no parameters at all.
fn bare(letter: char, rest: &[&str], command: Command) -> Result<Command, CommandError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::ParameterMismatch(letter))
    }
}

fn parse_insert(rest: &[&str]) -> Result<Command, CommandError> {
    let [name, kind, detail @ ..] = rest else {
        return Err(CommandError::ParameterMismatch('I'));
    };

    let descriptor = match *kind {
        "FUNCTION" => {
            let [ret, params @ ..] = detail else {
                return Err(CommandError::ParameterMismatch('I'));
            };
            Some(function_descriptor(ret, params))
        }
        "STRUCT" | "UNION" => field_descriptor(detail)?,
        _ => {
            if !detail.is_empty() {
                return Err(CommandError::ParameterMismatch('I'));
            }
            None
        }
    };

    Ok(Command::Insert {
        name: (*name).to_owned(),
        kind: (*kind).to_owned(),
        descriptor,
    })
}

/// `RET<==` for a parameterless function, `RET<==(P1,P2)` otherwise.
fn function_descriptor(ret: &str, params: &[&str]) -> String {
    let mut descriptor = format!("{ret}<==");
    if !params.is_empty() {
        descriptor.push('(');
        descriptor.push_str(&params.join(","));
        descriptor.push(')');
    }
    descriptor
}

/// `{(T1,N1),(T2,N2)}` from type/name pairs; a fieldless declaration gets
/// no descriptor at all.
fn field_descriptor(detail: &[&str]) -> Result<Option<String>, CommandError> {
    if detail.is_empty() {
        return Ok(None);
    }
    if detail.len() % 2 != 0 {
        return Err(CommandError::ParameterMismatch('I'));
    }
    let fields: Vec<String> = detail
        .chunks(2)
        .map(|pair| format!("({},{})", pair[0], pair[1]))
        .collect();
    Ok(Some(format!("{{{}}}", fields.join(","))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_commands() {
        assert_eq!(parse_line("S"), Ok(Command::EnterScope));
        assert_eq!(parse_line("E"), Ok(Command::ExitScope));
        assert_eq!(parse_line("Q"), Ok(Command::Quit));
        assert_eq!(parse_line("P C"), Ok(Command::PrintCurrent));
        assert_eq!(parse_line("P A"), Ok(Command::PrintAll));
    }

    #[test]
    fn test_parse_plain_insert() {
        assert_eq!(
            parse_line("I x INT"),
            Ok(Command::Insert {
                name: "x".to_owned(),
                kind: "INT".to_owned(),
                descriptor: None,
            })
        );
    }

    #[test]
    fn test_parse_function_insert() {
        assert_eq!(
            parse_line("I foo FUNCTION INT FLOAT CHAR"),
            Ok(Command::Insert {
                name: "foo".to_owned(),
                kind: "FUNCTION".to_owned(),
                descriptor: Some("INT<==(FLOAT,CHAR)".to_owned()),
            })
        );
        assert_eq!(
            parse_line("I bar FUNCTION VOID"),
            Ok(Command::Insert {
                name: "bar".to_owned(),
                kind: "FUNCTION".to_owned(),
                descriptor: Some("VOID<==".to_owned()),
            })
        );
    }

    #[test]
    fn test_parse_struct_and_union_insert() {
        assert_eq!(
            parse_line("I p STRUCT FLOAT x FLOAT y"),
            Ok(Command::Insert {
                name: "p".to_owned(),
                kind: "STRUCT".to_owned(),
                descriptor: Some("{(FLOAT,x),(FLOAT,y)}".to_owned()),
            })
        );
        assert_eq!(
            parse_line("I u UNION INT tag"),
            Ok(Command::Insert {
                name: "u".to_owned(),
                kind: "UNION".to_owned(),
                descriptor: Some("{(INT,tag)}".to_owned()),
            })
        );
        // Fieldless aggregates carry no descriptor.
        assert_eq!(
            parse_line("I s STRUCT"),
            Ok(Command::Insert {
                name: "s".to_owned(),
                kind: "STRUCT".to_owned(),
                descriptor: None,
            })
        );
    }

    #[test]
    fn test_arity_mistakes_are_rejected() {
        assert_eq!(parse_line("I x"), Err(CommandError::ParameterMismatch('I')));
        assert_eq!(
            parse_line("I f FUNCTION"),
            Err(CommandError::ParameterMismatch('I'))
        );
        assert_eq!(
            parse_line("I s STRUCT INT"),
            Err(CommandError::ParameterMismatch('I'))
        );
        assert_eq!(
            parse_line("I x INT extra"),
            Err(CommandError::ParameterMismatch('I'))
        );
        assert_eq!(parse_line("L a b"), Err(CommandError::ParameterMismatch('L')));
        assert_eq!(parse_line("D"), Err(CommandError::ParameterMismatch('D')));
        assert_eq!(parse_line("S now"), Err(CommandError::ParameterMismatch('S')));
        assert_eq!(parse_line("P"), Err(CommandError::ParameterMismatch('P')));
    }

    #[test]
    fn test_unknown_commands_are_rejected() {
        assert_eq!(
            parse_line("W hello"),
            Err(CommandError::Unrecognized("W".to_owned()))
        );
        // A glued-together token is not a command either.
        assert_eq!(
            parse_line("IX a INT"),
            Err(CommandError::Unrecognized("IX".to_owned()))
        );
    }

    #[test]
    fn test_print_selector_must_be_c_or_a() {
        assert_eq!(parse_line("P X"), Err(CommandError::InvalidParameter('P')));
    }

    #[test]
    fn test_error_wording_matches_transcripts() {
        assert_eq!(
            CommandError::ParameterMismatch('L').to_string(),
            "Number of parameters mismatch for the command L"
        );
        assert_eq!(
            CommandError::InvalidParameter('P').to_string(),
            "Invalid parameter for the command P"
        );
        assert_eq!(
            CommandError::Unrecognized("W".to_owned()).to_string(),
            "Unrecognized command W"
        );
    }
}
