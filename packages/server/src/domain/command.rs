//! クライアントコマンドの文法定義
//!
//! クライアントは `"<verb> <payload>"` 形式のテキストを送信します。
//! verb は `message` または `image`、payload は行の残り全てです。

use thiserror::Error;

/// A parsed client command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// Broadcast a text message
    Message(String),
    /// Broadcast an opaque image reference
    Image(String),
}

/// Raised when client text carries no verb at all.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed client command: missing verb")]
pub struct MalformedCommand;

impl ClientCommand {
    /// Parse raw client text, splitting on the first whitespace boundary.
    ///
    /// Any verb other than `image` is treated as `message` with the rest of
    /// the line as payload. A typo like `"massage hi"` therefore still
    /// broadcasts as text; see the product note in DESIGN.md before
    /// tightening this.
    pub fn parse(text: &str) -> Result<Self, MalformedCommand> {
        let (verb, payload) = match text.split_once(char::is_whitespace) {
            Some((verb, payload)) => (verb, payload),
            None => (text, ""),
        };

        if verb.is_empty() {
            return Err(MalformedCommand);
        }

        match verb {
            "image" => Ok(Self::Image(payload.to_string())),
            _ => Ok(Self::Message(payload.to_string())),
        }
    }
}
