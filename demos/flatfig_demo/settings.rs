use flatfig::{ConfigStore, FlatfigError};

/// What the preferences panel shows, read from the store with the defaults a
/// fresh install starts with.
#[derive(Debug)]
pub struct Settings {
    pub username: Option<String>,
    pub account_type: i32,
    pub usage: i64,
    pub open_browser: bool,
    pub notification_sound: bool,
    pub history_size: i32,
    pub servers: Vec<String>,
}

pub const DEFAULT_SERVER: &str = "https://puush.me/";

impl Settings {
    pub fn read(store: &mut ConfigStore) -> Result<Self, FlatfigError> {
        Ok(Self {
            username: store.get("username", None::<String>)?,
            account_type: store.get("type", 0)?,
            usage: store.get("usage", 0i64)?,
            open_browser: store.get("openbrowser", false)?,
            notification_sound: store.get("notificationsound", true)?,
            history_size: store.get("historysize", 5)?,
            servers: store.get_array("servers", vec![DEFAULT_SERVER.to_string()])?,
        })
    }
}

/// Put `url` at the front of the recent-upload list, keeping at most
/// `historysize` entries.
pub fn push_history(store: &mut ConfigStore, url: &str) -> Result<Vec<String>, FlatfigError> {
    let limit = store.get("historysize", 5)?.max(0) as usize;
    let mut history: Vec<String> = store.get_array("history", Vec::new())?;
    history.retain(|u| u != url);
    history.insert(0, url.to_string());
    history.truncate(limit);
    store.set_array("history", history.clone())?;
    Ok(history)
}
