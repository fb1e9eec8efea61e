use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use letter_hunt_core::{GameConfig, GameMode, Level};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CODE_DOMAIN: &str = "hunt";
const CODE_VERSION: &str = "v1";

/// Identifier prefix emitted before the board size and payload.
pub(crate) const CODE_HEADER: &str = "hunt:v1";
const FIELD_DELIMITER: char = ':';

/// Everything needed to replay the opening round of a session on another machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ShareCode {
    pub(crate) board_size: usize,
    pub(crate) seed: u64,
    pub(crate) level: Level,
    pub(crate) mode: GameMode,
}

#[derive(Serialize, Deserialize)]
struct Payload {
    seed: u64,
    level: Level,
    mode: GameMode,
}

impl ShareCode {
    /// Captures the opening round settings of `config`, which must carry a seed.
    pub(crate) fn from_config(config: &GameConfig, seed: u64) -> Self {
        Self {
            board_size: config.board_size,
            seed,
            level: config.starting_level,
            mode: config.default_mode,
        }
    }

    /// Writes the shared settings into `config`.
    pub(crate) fn apply_to(&self, config: &mut GameConfig) {
        config.board_size = self.board_size;
        config.seed = Some(self.seed);
        config.starting_level = self.level;
        config.default_mode = self.mode;
    }

    /// Encodes the settings into a single-line string suitable for pasting.
    pub(crate) fn encode(&self) -> Result<String, ShareCodeError> {
        let payload = Payload {
            seed: self.seed,
            level: self.level,
            mode: self.mode,
        };
        let json = serde_json::to_vec(&payload).map_err(ShareCodeError::InvalidPayload)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!("{CODE_HEADER}:{}:{encoded}", self.board_size))
    }

    /// Decodes settings from a string produced by [`ShareCode::encode`].
    pub(crate) fn decode(value: &str) -> Result<Self, ShareCodeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ShareCodeError::Empty);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(ShareCodeError::MissingField("prefix"))?;
        let version = parts.next().ok_or(ShareCodeError::MissingField("version"))?;
        let size = parts
            .next()
            .ok_or(ShareCodeError::MissingField("board size"))?;
        let payload = parts.next().ok_or(ShareCodeError::MissingField("payload"))?;

        if domain != CODE_DOMAIN {
            return Err(ShareCodeError::InvalidPrefix(domain.to_owned()));
        }
        if version != CODE_VERSION {
            return Err(ShareCodeError::UnsupportedVersion(version.to_owned()));
        }

        let board_size = match size.trim().parse::<usize>() {
            Ok(board_size) if board_size > 0 => board_size,
            _ => return Err(ShareCodeError::InvalidBoardSize(size.to_owned())),
        };
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(ShareCodeError::InvalidEncoding)?;
        let decoded: Payload =
            serde_json::from_slice(&bytes).map_err(ShareCodeError::InvalidPayload)?;

        Ok(Self {
            board_size,
            seed: decoded.seed,
            level: decoded.level,
            mode: decoded.mode,
        })
    }
}

/// Errors that can occur while decoding share codes.
#[derive(Debug, Error)]
pub(crate) enum ShareCodeError {
    /// The provided string was empty or contained only whitespace.
    #[error("share code was empty")]
    Empty,
    /// A segment of the share code was missing.
    #[error("share code is missing the {0}")]
    MissingField(&'static str),
    /// The share code used an unexpected prefix segment.
    #[error("share code prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The share code used an unsupported version identifier.
    #[error("share code version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The board size segment was not a positive number.
    #[error("could not parse board size '{0}'")]
    InvalidBoardSize(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode share code payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse share code payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use letter_hunt_core::Command;
    use letter_hunt_session::{self as session, query, Session};

    use super::*;

    fn sample() -> ShareCode {
        ShareCode {
            board_size: 12,
            seed: 0xdead_beef_0042,
            level: Level::new(6),
            mode: GameMode::Count,
        }
    }

    #[test]
    fn encoded_code_carries_header_and_size() {
        let encoded = sample().encode().expect("encodes");
        assert!(encoded.starts_with(&format!("{CODE_HEADER}:12:")));
        assert_eq!(ShareCode::decode(&encoded).expect("decodes"), sample());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let encoded = format!("  {}\n", sample().encode().expect("encodes"));
        assert_eq!(ShareCode::decode(&encoded).expect("decodes"), sample());
    }

    #[test]
    fn rejects_foreign_or_malformed_codes() {
        assert!(matches!(ShareCode::decode("   "), Err(ShareCodeError::Empty)));
        assert!(matches!(
            ShareCode::decode("quiz:v1:12:abc"),
            Err(ShareCodeError::InvalidPrefix(prefix)) if prefix == "quiz"
        ));
        assert!(matches!(
            ShareCode::decode("hunt:v9:12:abc"),
            Err(ShareCodeError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            ShareCode::decode("hunt:v1:0:abc"),
            Err(ShareCodeError::InvalidBoardSize(_))
        ));
        assert!(matches!(
            ShareCode::decode("hunt:v1:12"),
            Err(ShareCodeError::MissingField("payload"))
        ));
        assert!(matches!(
            ShareCode::decode("hunt:v1:12:!!!"),
            Err(ShareCodeError::InvalidEncoding(_))
        ));
        let not_json = STANDARD_NO_PAD.encode(b"not json");
        assert!(matches!(
            ShareCode::decode(&format!("hunt:v1:12:{not_json}")),
            Err(ShareCodeError::InvalidPayload(_))
        ));
    }

    #[test]
    fn decode_errors_name_the_faulty_segment() {
        let missing = ShareCode::decode("hunt").expect_err("no version");
        assert_eq!(missing.to_string(), "share code is missing the version");
        let size = ShareCode::decode("hunt:v1:abc:xyz").expect_err("bad size");
        assert_eq!(size.to_string(), "could not parse board size 'abc'");
    }

    #[test]
    fn imported_code_replays_the_same_opening_board() {
        let mut shared = GameConfig {
            starting_level: Level::new(3),
            ..GameConfig::default()
        };
        let code = ShareCode::from_config(&shared, 987_654);
        code.apply_to(&mut shared);

        let mut imported = GameConfig::default();
        ShareCode::decode(&code.encode().expect("encodes"))
            .expect("decodes")
            .apply_to(&mut imported);
        assert_eq!(imported, shared);

        let boards: Vec<_> = [shared, imported]
            .into_iter()
            .map(|config| {
                let mut session = Session::new(config).expect("valid config");
                let mut events = Vec::new();
                session::apply(
                    &mut session,
                    Command::GenerateNewGame {
                        level: None,
                        target_count: None,
                        mode: None,
                    },
                    &mut events,
                )
                .expect("round starts");
                query::board(&session).cloned().expect("board")
            })
            .collect();
        assert_eq!(boards[0], boards[1]);
    }
}
