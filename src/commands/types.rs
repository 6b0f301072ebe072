/// A chat utterance classified into exactly one command. Immutable once
/// produced; titles keep the casing the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Add {
        title: String,
    },
    List,
    Complete {
        title: String,
    },
    Update {
        old_title: String,
        new_title: String,
    },
    Delete {
        title: String,
    },
    /// Unrecognized or locally invalid input. `hint` is the user-facing
    /// explanation (generic help, empty title, malformed update syntax).
    Unknown {
        hint: String,
    },
}

/// The only output type crossing back to the chat caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReply {
    pub message: String,
    pub succeeded: bool,
}

impl CommandReply {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            succeeded: true,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            succeeded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_constructors_set_flag() {
        assert!(CommandReply::ok("done").succeeded);
        assert!(!CommandReply::fail("nope").succeeded);
    }
}
