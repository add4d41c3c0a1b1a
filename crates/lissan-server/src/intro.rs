use std::sync::Arc;

use tokio::sync::RwLock;

/// Introduction text shared by every request
#[derive(Debug, Clone, Default)]
pub struct IntroStore {
    text: Arc<RwLock<String>>,
}

impl IntroStore {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            text: Arc::new(RwLock::new(initial.into())),
        }
    }

    pub async fn get(&self) -> String {
        self.text.read().await.clone()
    }

    pub async fn set(&self, text: String) {
        *self.text.write().await = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_is_visible_through_clones() {
        let store = IntroStore::new("hello");
        let other = store.clone();

        other.set("ሰላም  with spaces ".to_string()).await;

        assert_eq!(store.get().await, "ሰላም  with spaces ");
    }
}
