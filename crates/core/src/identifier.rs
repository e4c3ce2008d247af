// crates/core/src/identifier.rs
//! Target identifier grammar and card families
//!
//! A target identifier names one memory-card image, e.g. `SLUS-21274-1.mc2`:
//! a card name, a channel digit 1-8, and an extension that selects the card
//! family. Parsing is the validation gate for the whole tool: a name that
//! does not match the grammar never reaches the transport layer.

use crate::error::{CoreError, CoreResult};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// `<CardName>-<Channel>.<ext>` with no path separators in the card name
static TARGET_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^/\\]+)-([1-8])\.([A-Za-z0-9]+)$").expect("target name grammar is valid")
});

/// A memory-card image family recognised by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardFamily {
    /// PS2 virtual cards (`.mc2` on the remote, stored locally as `.bin`)
    Ps2,
    /// PS1 virtual cards (`.mcd`, stored losslessly under the same extension)
    Ps1,
}

impl CardFamily {
    /// All known families, in remote-extension match order
    pub const ALL: [CardFamily; 2] = [CardFamily::Ps2, CardFamily::Ps1];

    /// Extension the remote uses for this family
    pub fn remote_ext(&self) -> &'static str {
        match self {
            CardFamily::Ps2 => "mc2",
            CardFamily::Ps1 => "mcd",
        }
    }

    /// Root directory on the remote for this family
    pub fn remote_root(&self) -> &'static str {
        match self {
            CardFamily::Ps2 => "PS2",
            CardFamily::Ps1 => "PS1",
        }
    }

    /// Extension used for the local copy
    pub fn local_ext(&self) -> &'static str {
        match self {
            CardFamily::Ps2 => "bin",
            CardFamily::Ps1 => "mcd",
        }
    }

    /// Resolves a remote extension (case-insensitive) to its family
    pub fn from_remote_ext(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.remote_ext().eq_ignore_ascii_case(ext))
    }
}

impl fmt::Display for CardFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.remote_root())
    }
}

/// A validated target identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetName {
    raw: String,
    card_name: String,
    channel: u8,
    family: CardFamily,
}

impl TargetName {
    /// Parses an identifier against the card filename grammar.
    ///
    /// Fails with [`CoreError::InvalidTargetFormat`] when the name has no
    /// channel suffix, a channel outside 1-8, a path separator, or an
    /// extension no family claims.
    pub fn parse(name: &str) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidTargetFormat {
            name: name.to_string(),
        };

        let caps = TARGET_NAME.captures(name).ok_or_else(invalid)?;
        let family = CardFamily::from_remote_ext(&caps[3]).ok_or_else(invalid)?;
        let channel: u8 = caps[2].parse().map_err(|_| invalid())?;

        Ok(Self {
            raw: name.to_string(),
            card_name: caps[1].to_string(),
            channel,
            family,
        })
    }

    /// The identifier exactly as supplied
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Card name without the channel suffix, e.g. `SLUS-21274`
    pub fn card_name(&self) -> &str {
        &self.card_name
    }

    /// Channel number, 1-8
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Card family selected by the extension
    pub fn family(&self) -> CardFamily {
        self.family
    }

    /// The identifier without its extension, e.g. `SLUS-21274-1`
    pub fn stem(&self) -> String {
        format!("{}-{}", self.card_name, self.channel)
    }

    /// Filename for the local copy, e.g. `SLUS-21274-1.bin`
    pub fn local_file_name(&self) -> String {
        format!("{}.{}", self.stem(), self.family.local_ext())
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
