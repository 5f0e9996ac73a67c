// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   FileHandler      text/JSON reads, sync and tokio, encoding labels
//! random
//!   RandomGenerator  pick(), bool(), string(), int(), guid()
//! ```

pub mod fs;
pub mod random;
