use tokio::sync::RwLock;
use verba_config::Config;
use verba_types::{LanguagePair, Workspace};

pub struct AppState {
    pub config: RwLock<Config>,
    /// Source/target selections and both text areas
    pub workspace: RwLock<Workspace>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let pair = LanguagePair::new(
            config.translator.from_lang.clone(),
            config.translator.to_lang.clone(),
        );

        Self {
            config: RwLock::new(config),
            workspace: RwLock::new(Workspace::new(pair)),
        }
    }

    pub async fn snapshot(&self) -> Workspace {
        self.workspace.read().await.clone()
    }

    pub async fn target_text(&self) -> String {
        self.workspace.read().await.target_text.clone()
    }

    /// Last write wins
    pub async fn set_target_text(&self, text: String) {
        self.workspace.write().await.target_text = text;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
