use super::types::ParsedCommand;

/// Shown whenever no command keyword matches.
pub const HELP_HINT: &str = "command not recognized. Try: add / list / complete / delete / update";
/// Shown when a command keyword matched but no title followed it.
pub const EMPTY_TITLE_HINT: &str = "title cannot be empty";
/// Shown when an update is missing the " to " separator or either side of it.
pub const UPDATE_FORMAT_HINT: &str = "use format: update <old title> to <new title>";

const UPDATE_SEPARATOR: &str = " to ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Add,
    Complete,
    Update,
    Delete,
    List,
}

/// Fixed tie-break order for keyword detection. Earlier entries win, so a
/// message containing both "add" and "list" is an Add because that rule is
/// checked first.
pub const MATCH_ORDER: [CommandKind; 5] = [
    CommandKind::Add,
    CommandKind::Complete,
    CommandKind::Update,
    CommandKind::Delete,
    CommandKind::List,
];

impl CommandKind {
    const fn keyword(self) -> &'static str {
        match self {
            CommandKind::Add => "add",
            CommandKind::Complete => "complete",
            CommandKind::Update => "update",
            CommandKind::Delete => "delete",
            CommandKind::List => "list",
        }
    }

    fn matches(self, text: &str) -> bool {
        match self {
            // "list" matches anywhere in the message.
            CommandKind::List => find_ignore_ascii_case(text, self.keyword()).is_some(),
            _ => starts_with_keyword(text, self.keyword()),
        }
    }
}

/// Classify a raw utterance into exactly one command.
///
/// Total and pure: every input maps to one `ParsedCommand`, matching is
/// case-insensitive, and extracted titles keep the casing the user typed.
pub fn parse(raw: &str) -> ParsedCommand {
    let text = raw.trim();

    let Some(kind) = MATCH_ORDER.into_iter().find(|kind| kind.matches(text)) else {
        return ParsedCommand::Unknown {
            hint: HELP_HINT.into(),
        };
    };

    match kind {
        CommandKind::List => ParsedCommand::List,
        CommandKind::Add => title_command(text, kind, |title| ParsedCommand::Add { title }),
        CommandKind::Complete => {
            title_command(text, kind, |title| ParsedCommand::Complete { title })
        }
        CommandKind::Delete => title_command(text, kind, |title| ParsedCommand::Delete { title }),
        CommandKind::Update => parse_update(text),
    }
}

fn title_command(
    text: &str,
    kind: CommandKind,
    build: impl FnOnce(String) -> ParsedCommand,
) -> ParsedCommand {
    // The matched keyword is ASCII, so slicing at its length is safe.
    let title = text[kind.keyword().len()..].trim();
    if title.is_empty() {
        ParsedCommand::Unknown {
            hint: EMPTY_TITLE_HINT.into(),
        }
    } else {
        build(title.to_string())
    }
}

fn parse_update(text: &str) -> ParsedCommand {
    let rest = &text[CommandKind::Update.keyword().len()..];

    // First separator wins: "update a to b to c" renames "a" to "b to c".
    let Some(at) = find_ignore_ascii_case(rest, UPDATE_SEPARATOR) else {
        return ParsedCommand::Unknown {
            hint: UPDATE_FORMAT_HINT.into(),
        };
    };

    let old_title = rest[..at].trim();
    let new_title = rest[at + UPDATE_SEPARATOR.len()..].trim();
    if old_title.is_empty() || new_title.is_empty() {
        return ParsedCommand::Unknown {
            hint: UPDATE_FORMAT_HINT.into(),
        };
    }

    ParsedCommand::Update {
        old_title: old_title.to_string(),
        new_title: new_title.to_string(),
    }
}

/// Keyword prefix match requiring a word boundary: the text is either the
/// keyword itself (empty title, caught by validation) or keyword + space.
fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    let bytes = text.as_bytes();
    let len = keyword.len();
    if bytes.len() < len || !bytes[..len].eq_ignore_ascii_case(keyword.as_bytes()) {
        return false;
    }
    bytes.len() == len || bytes[len] == b' '
}

fn find_ignore_ascii_case(text: &str, needle: &str) -> Option<usize> {
    let haystack = text.as_bytes();
    let needle = needle.as_bytes();
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}
