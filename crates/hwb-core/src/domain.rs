use std::fmt;

/// Chat destination id, kept opaque in the core.
///
/// The messenger adapter decides how to address it (numeric id vs channel name).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub String);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
