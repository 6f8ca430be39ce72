//! # Line Commands
//!
//! One command per line, one JSON envelope per reply.
//!
//! | Command | Reply `data` |
//! |---------|--------------|
//! | `create <RSA\|ECC> [label]` | `{"id"}` |
//! | `sign <id> <data...>` | `{"signature", "signed_data"}` |
//! | `get <id>` | `{"id", "label"}` |
//! | `list` | `[{"id", "label"}]` |
//! | `pubkey <id>` | `{"id", "algorithm", "public_key", "counter"}` |
//! | `verify <id> <signature> <payload>` | `{"valid": true}` |
//! | `health` | `{"status", "version"}` |
//! | `metrics` | Prometheus text exposition |
//! | `quit` | no reply |
//!
//! Trailing free text (labels, data, payloads) is the rest of the line with
//! outer whitespace trimmed, so it may contain spaces.

use crate::dto::{
    CreateSignatureDeviceRequest, CreateSignatureDeviceResponse, ErrorResponse,
    GetDeviceResponse, HealthResponse, PublicKeyResponse, Response, SignTransactionRequest,
    SignTransactionResponse, VerifyResponse,
};
use sc_02_signature_chain::{ErrorKind, SignatureDeviceApi, SigningServiceError};
use serde::Serialize;
use shared_types::DeviceId;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

// =============================================================================
// PARSING
// =============================================================================

/// A parsed driver command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(CreateSignatureDeviceRequest),
    Sign {
        id: String,
        request: SignTransactionRequest,
    },
    Get {
        id: String,
    },
    List,
    PublicKey {
        id: String,
    },
    Verify {
        id: String,
        signature: String,
        payload: String,
    },
    Health,
    Metrics,
    Quit,
}

/// Malformed command line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

/// Split off the first whitespace-delimited word.
fn next_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(end) => Some((&input[..end], &input[end..])),
        None => Some((input, "")),
    }
}

fn require<'a>(
    input: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<(&'a str, &'a str), CommandError> {
    next_word(input).ok_or(CommandError::MissingArgument { command, argument })
}

/// Remainder of the line with the separating whitespace removed.
fn rest(input: &str) -> Option<String> {
    let text = input.trim();
    (!text.is_empty()).then(|| text.to_string())
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (verb, args) = next_word(line).ok_or(CommandError::Empty)?;

        match verb.to_ascii_lowercase().as_str() {
            "create" => {
                let (algorithm, args) = require(args, "create", "algorithm")?;
                Ok(Command::Create(CreateSignatureDeviceRequest {
                    algorithm: algorithm.to_string(),
                    label: rest(args),
                }))
            }
            "sign" => {
                let (id, args) = require(args, "sign", "device id")?;
                let data = rest(args).ok_or(CommandError::MissingArgument {
                    command: "sign",
                    argument: "data",
                })?;
                Ok(Command::Sign {
                    id: id.to_string(),
                    request: SignTransactionRequest {
                        data_to_be_signed: data,
                    },
                })
            }
            "get" => {
                let (id, _) = require(args, "get", "device id")?;
                Ok(Command::Get { id: id.to_string() })
            }
            "list" => Ok(Command::List),
            "pubkey" => {
                let (id, _) = require(args, "pubkey", "device id")?;
                Ok(Command::PublicKey { id: id.to_string() })
            }
            "verify" => {
                let (id, args) = require(args, "verify", "device id")?;
                let (signature, args) = require(args, "verify", "signature")?;
                let payload = rest(args).ok_or(CommandError::MissingArgument {
                    command: "verify",
                    argument: "payload",
                })?;
                Ok(Command::Verify {
                    id: id.to_string(),
                    signature: signature.to_string(),
                    payload,
                })
            }
            "health" => Ok(Command::Health),
            "metrics" => Ok(Command::Metrics),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Status code for a service error, following HTTP semantics.
pub fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::NotFound => 404,
        ErrorKind::Persistence => 500,
        ErrorKind::LockTimeout | ErrorKind::Cancelled => 503,
        ErrorKind::Validation
        | ErrorKind::AlreadyExists
        | ErrorKind::UnsupportedAlgorithm
        | ErrorKind::KeyGeneration
        | ErrorKind::Signing => 400,
    }
}

/// One rendered reply line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Status code; 200 for success
    pub status: u16,
    /// Serialized envelope
    pub body: String,
}

impl Reply {
    fn ok<T: Serialize>(data: T) -> Self {
        Self::render(200, &Response { data })
    }

    fn error(status: u16, message: String) -> Self {
        Self::render(
            status,
            &ErrorResponse {
                status,
                errors: vec![message],
            },
        )
    }

    fn render<T: Serialize>(status: u16, envelope: &T) -> Self {
        match serde_json::to_string(envelope) {
            Ok(body) => Self { status, body },
            Err(_) => Self {
                status: 500,
                body: r#"{"status":500,"errors":["Internal Server Error"]}"#.to_string(),
            },
        }
    }

    /// Whether this reply reports success.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

impl From<SigningServiceError> for Reply {
    fn from(err: SigningServiceError) -> Self {
        Reply::error(status_for(err.kind()), err.to_string())
    }
}

impl From<CommandError> for Reply {
    fn from(err: CommandError) -> Self {
        Reply::error(400, err.to_string())
    }
}

/// Routes commands onto a `SignatureDeviceApi`.
pub struct Dispatcher<'a> {
    api: &'a dyn SignatureDeviceApi,
}

impl<'a> Dispatcher<'a> {
    pub fn new(api: &'a dyn SignatureDeviceApi) -> Self {
        Self { api }
    }

    /// Parse and execute one line. `None` means the session should end.
    pub fn handle_line(&self, line: &str) -> Option<Reply> {
        match line.parse::<Command>() {
            Ok(Command::Quit) => None,
            Ok(command) => Some(self.execute(command)),
            Err(err) => Some(err.into()),
        }
    }

    /// Execute a parsed command.
    pub fn execute(&self, command: Command) -> Reply {
        debug!(?command, "Executing command");
        let result = match command {
            Command::Create(request) => self
                .api
                .create_device_named(&request.algorithm, request.label)
                .map(|id| Reply::ok(CreateSignatureDeviceResponse { id: id.to_string() })),

            Command::Sign { id, request } => self
                .api
                .sign_transaction(&DeviceId::new(id), &request.data_to_be_signed)
                .map(|signed| Reply::ok(SignTransactionResponse::from(signed))),

            Command::Get { id } => self
                .api
                .get_device(&DeviceId::new(id))
                .map(|summary| Reply::ok(GetDeviceResponse::from(summary))),

            Command::List => self.api.list_devices().map(|summaries| {
                let devices: Vec<GetDeviceResponse> =
                    summaries.into_iter().map(GetDeviceResponse::from).collect();
                Reply::ok(devices)
            }),

            Command::PublicKey { id } => {
                self.api.device_public_key(&DeviceId::new(id)).map(|key| {
                    Reply::ok(PublicKeyResponse {
                        id: key.id.to_string(),
                        algorithm: key.algorithm,
                        public_key: key.public_key,
                        counter: key.counter,
                    })
                })
            }

            Command::Verify {
                id,
                signature,
                payload,
            } => self
                .api
                .verify_signature(&DeviceId::new(id), &payload, &signature)
                .map(|()| Reply::ok(VerifyResponse { valid: true })),

            Command::Health => Ok(Reply::ok(HealthResponse::default())),

            Command::Metrics => Ok(match sc_telemetry::gather_text() {
                Ok(text) => Reply::ok(text),
                Err(err) => Reply::error(500, err.to_string()),
            }),

            Command::Quit => Ok(Reply::ok(())),
        };

        result.unwrap_or_else(Reply::from)
    }
}
