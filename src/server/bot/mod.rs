//! Discord bot integration for licence lookups.
//!
//! The bot is optional and only started when a bot token is configured. It runs in a
//! separate tokio task so it never blocks the HTTP server, and exposes a `/license` slash
//! command that lets server administrators inspect a licence without consuming a request.
//!
//! # Gateway Intents
//!
//! The bot only requires the `GUILDS` intent. Slash commands are delivered as
//! interactions and need no privileged intents.

pub mod command;
pub mod handler;
pub mod start;
