//! Command interpreter: dispatch, validation, and the mutating handlers.
//!
//! ## Dispatch
//!
//! ```text
//! line
//!   ↓
//! first word (letters, digits, `_`)
//!   ├─ quit | EOF | help | create      → handler
//!   ├─ all | show | destroy | count | update
//!   │                                  → tokenize rest → handler
//!   └─ anything else                   → dotted call?
//!        <Type>.<command>(<args>)      → "<Type> <args>" → same handler
//!        otherwise                     → *** Unknown syntax
//! ```
//!
//! ## Validation order
//!
//! `show`, `destroy`, and `update` short-circuit at the first failure:
//! class name missing → class doesn't exist → instance id missing →
//! no instance found. Each failure prints exactly one line.
//!
//! ## Mutations
//!
//! `create`, `destroy`, and `update` end in a full snapshot save. They run
//! inside [`Storage::atomically`], so a failed save restores the identity map
//! and a rejected command leaves both map and snapshot as they were.

use std::io::{self, Write};

use hbnb_core::entity::is_reserved;
use hbnb_core::{AttrValue, DomainError, Entity, ModelRegistry, ModelSchema, entity_key, parse_dict};
use hbnb_infra::{SnapshotStore, Storage};

use crate::error::CommandError;
use crate::help;
use crate::params::parse_param;
use crate::tokenizer::parse;

/// Whether the read loop keeps going after a line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Commands reachable in both surface syntaxes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Routable {
    All,
    Show,
    Destroy,
    Count,
    Update,
}

impl Routable {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "all" => Some(Self::All),
            "show" => Some(Self::Show),
            "destroy" => Some(Self::Destroy),
            "count" => Some(Self::Count),
            "update" => Some(Self::Update),
            _ => None,
        }
    }
}

/// Successful handler output: a line to print, or nothing.
type Reply = Result<Option<String>, CommandError>;

/// Line interpreter over a [`Storage`] engine, writing replies to `out`.
pub struct Interpreter<S, W> {
    storage: Storage<S>,
    registry: ModelRegistry,
    out: W,
}

impl<S, W> Interpreter<S, W> {
    pub fn new(storage: Storage<S>, registry: ModelRegistry, out: W) -> Self {
        Self {
            storage,
            registry,
            out,
        }
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

impl<S: SnapshotStore, W: Write> Interpreter<S, W> {
    /// Interpret one line.
    ///
    /// Only I/O failures on the output are returned as errors; rejected
    /// commands are printed and the loop continues.
    pub fn onecmd(&mut self, line: &str) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        let expanded;
        let line = match line.strip_prefix('?') {
            Some(rest) => {
                expanded = format!("help {rest}");
                expanded.as_str()
            }
            None => line,
        };

        let (command, args) = split_command(line);
        let reply = match command {
            "quit" => return Ok(Flow::Stop),
            "EOF" => return self.eof(),
            "help" => Ok(Some(help_reply(args))),
            "create" => self.create(args),
            name => match Routable::from_name(name) {
                Some(routable) => self.run(routable, args),
                None => self.dotted(line),
            },
        };

        match reply {
            Ok(Some(text)) => writeln!(self.out, "{text}")?,
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(line = %line, error = %err, "command rejected");
                writeln!(self.out, "{err}")?;
            }
        }
        self.out.flush()?;
        Ok(Flow::Continue)
    }

    /// End of input: print a blank line and stop.
    pub fn eof(&mut self) -> io::Result<Flow> {
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(Flow::Stop)
    }

    /// `<Type>.<command>(<args>)`, rewritten to `<Type> <args>`.
    fn dotted(&mut self, line: &str) -> Reply {
        let routed = split_dotted(line)
            .and_then(|(name, call)| Routable::from_name(name).map(|routable| (routable, call)));
        match routed {
            Some((routable, call)) => self.run(routable, &call),
            None => Err(CommandError::UnknownSyntax(line.to_string())),
        }
    }

    fn run(&mut self, routable: Routable, args: &str) -> Reply {
        let tokens = parse(args)?;
        match routable {
            Routable::All => self.all(&tokens),
            Routable::Show => self.show(&tokens),
            Routable::Destroy => self.destroy(&tokens),
            Routable::Count => self.count(&tokens),
            Routable::Update => self.update(&tokens),
        }
    }

    fn create(&mut self, args: &str) -> Reply {
        let tokens = parse(args)?;
        let schema = schema_for(&self.registry, &tokens)?;
        let params = create_params(schema, tokens.get(1..).unwrap_or_default());

        let id = self.storage.atomically(|storage| {
            let id = Entity::create_new(schema, storage).map_err(CommandError::Storage)?;
            if let Some(entity) = storage.get_mut(&entity_key(schema.name(), id.as_str())) {
                for (name, value) in params {
                    entity.set_attribute(name, value)?;
                }
            }
            storage.save().map_err(CommandError::SaveFailed)?;
            Ok::<_, CommandError>(id)
        })?;
        tracing::info!(type_name = schema.name(), id = %id, "entity created");
        Ok(Some(id.to_string()))
    }

    fn show(&mut self, tokens: &[String]) -> Reply {
        let key = self.instance_key(tokens)?;
        let entity = self.storage.get(&key).ok_or(CommandError::NoInstanceFound)?;
        Ok(Some(entity.to_string()))
    }

    fn destroy(&mut self, tokens: &[String]) -> Reply {
        let key = self.instance_key(tokens)?;
        self.storage.atomically(|storage| {
            storage.remove(&key);
            storage.save().map_err(CommandError::SaveFailed)
        })?;
        tracing::info!(key = %key, "entity destroyed");
        Ok(None)
    }

    fn all(&mut self, tokens: &[String]) -> Reply {
        let filter = match tokens.first() {
            Some(name) if !self.registry.contains(name) => {
                return Err(CommandError::ClassDoesNotExist);
            }
            Some(name) => Some(name.as_str()),
            None => None,
        };
        let rendered: Vec<String> = self
            .storage
            .all()
            .values()
            .filter(|entity| filter.is_none_or(|name| entity.type_name() == name))
            .map(ToString::to_string)
            .collect();
        Ok(Some(format!("[{}]", rendered.join(", "))))
    }

    fn count(&mut self, tokens: &[String]) -> Reply {
        let schema = schema_for(&self.registry, tokens)?;
        Ok(Some(self.storage.count(schema.name()).to_string()))
    }

    fn update(&mut self, tokens: &[String]) -> Reply {
        let key = self.instance_key(tokens)?;
        let schema = schema_for(&self.registry, tokens)?;

        let changes: Vec<(String, AttrValue)> = match tokens.get(2..).unwrap_or_default() {
            [] => return Err(CommandError::AttributeNameMissing),
            [literal] if literal.starts_with('{') => parse_dict(literal)?.into_iter().collect(),
            [_] => return Err(CommandError::ValueMissing),
            [name, value, ..] => vec![(name.clone(), AttrValue::Str(value.clone()))],
        };

        // Validate every change before touching the entity.
        let mut coerced = Vec::with_capacity(changes.len());
        for (name, value) in changes {
            if is_reserved(&name) {
                return Err(DomainError::ReadOnlyAttribute(name).into());
            }
            let value = schema.coerce(&name, value)?;
            coerced.push((name, value));
        }

        self.storage.atomically(|storage| {
            if let Some(entity) = storage.get_mut(&key) {
                for (name, value) in coerced {
                    entity.set_attribute(name, value)?;
                }
            }
            storage
                .touch_and_persist(&key)
                .map_err(CommandError::SaveFailed)?;
            Ok::<_, CommandError>(())
        })?;
        tracing::info!(key = %key, "entity updated");
        Ok(None)
    }

    /// Steps 1-4 of instance validation; returns the identity-map key.
    fn instance_key(&self, tokens: &[String]) -> Result<String, CommandError> {
        let schema = schema_for(&self.registry, tokens)?;
        let id = tokens.get(1).ok_or(CommandError::InstanceIdMissing)?;
        let key = entity_key(schema.name(), id);
        if !self.storage.contains(&key) {
            return Err(CommandError::NoInstanceFound);
        }
        Ok(key)
    }
}

/// Steps 1-2 of validation: a type token is present and registered.
fn schema_for<'r>(
    registry: &'r ModelRegistry,
    tokens: &[String],
) -> Result<&'r ModelSchema, CommandError> {
    let name = tokens.first().ok_or(CommandError::ClassNameMissing)?;
    registry.get(name).ok_or(CommandError::ClassDoesNotExist)
}

/// Usable `key=value` parameters for `create`; the rest are skipped.
fn create_params(schema: &ModelSchema, tokens: &[String]) -> Vec<(String, AttrValue)> {
    tokens
        .iter()
        .filter_map(|token| {
            let Some((name, value)) = parse_param(token) else {
                tracing::debug!(param = %token, "skipping malformed create parameter");
                return None;
            };
            if is_reserved(&name) {
                tracing::debug!(param = %token, "skipping read-only create parameter");
                return None;
            }
            match schema.coerce(&name, value) {
                Ok(value) => Some((name, value)),
                Err(err) => {
                    tracing::debug!(param = %token, error = %err, "skipping create parameter");
                    None
                }
            }
        })
        .collect()
}

/// Split off the leading identifier-character command word.
fn split_command(line: &str) -> (&str, &str) {
    let end = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(line.len());
    (&line[..end], line[end..].trim())
}

/// First `.`, then the first `(...)` after it: `(command, "<Type> <args>")`.
fn split_dotted(line: &str) -> Option<(&str, String)> {
    let (type_name, rest) = line.split_once('.')?;
    let open = rest.find('(')?;
    let close = open + 1 + rest[open + 1..].find(')')?;
    let command = &rest[..open];
    let args = &rest[open + 1..close];
    Some((command, format!("{type_name} {args}")))
}

fn help_reply(args: &str) -> String {
    if args.is_empty() {
        return help::overview();
    }
    match help::topic(args) {
        Some(usage) => usage.to_string(),
        None => format!("*** No help on {args}"),
    }
}
