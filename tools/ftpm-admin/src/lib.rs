//! FTPM-Admin: terminal admin panel for a vsftpd server managed through the
//! FTP Manager API.
//!
//! ## Architecture
//!
//! Key presses update the [`App`] model, which answers with a [`Command`]
//! when work is needed. The [`runtime::Runtime`] executes commands inside the
//! visible page's lifecycle and sends results back as [`AppEvent`]s.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  FTPM-ADMIN                                                     │
//! ├────────────────────────┬────────────────────────────────────────┤
//! │  PAGES                 │  DASHBOARD                             │
//! │  [1] Dashboard         │  ┌ Active Users ┐┌ Server ┐ ...        │
//! │  [2] Users             │  │      3       ││ online │            │
//! │  ...                   │  └──────────────┘└────────┘            │
//! ├────────────────────────┤  ┌ Recent Users ──────────────┐        │
//! │  SERVER STATUS         │  │  A  alice  ● online  ...   │        │
//! │  DISK: ████░░ 42%      │  └────────────────────────────┘        │
//! └────────────────────────┴────────────────────────────────────────┘
//! ```

pub mod demo;
pub mod domain;
pub mod runtime;
pub mod ui;

pub use domain::{App, AppEvent, AppState, Command, Key, Page};
