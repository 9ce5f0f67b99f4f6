pub mod apply;
pub mod create_funnel;
pub mod init;
pub mod show;
pub mod validate;

pub use apply::{apply, ApplyArgs};
pub use create_funnel::{create_funnel, CreateFunnelArgs};
pub use init::{init, InitArgs};
pub use show::{show, ShowArgs};
pub use validate::validate;

use crate::config::Config;
use anyhow::Result;
use funnel_editor::{JsonFileStore, Session};

/// Open a session on the configured document file
pub(crate) fn open_session(cwd: &str) -> Result<Session> {
    let config = Config::load(cwd)?;
    let store = JsonFileStore::new(config.get_data_path(cwd));
    Ok(Session::open(store, config.session_options())?)
}
