// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        check / validate / schema
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML, layered, [[vars]]  |
//!              '-------------+-------------'
//!                            v
//!              ,---------------------------,
//!              |            env            |
//!              |  EnvSource -> Registry    |
//!              |  -> Snapshot (immutable)  |
//!              |  env_snapshot! { .. }     |
//!              '------+-------------+------'
//!                     v             v
//!                  parser  ---->  validator
//!               parse_as_*        is_guid, is_email, ..
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod parser;
pub mod utility;
pub mod validator;
