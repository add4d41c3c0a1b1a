use serde::Deserialize;

/// Introduction text shown by the English front-end
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntroConfig {
    /// Text the store holds at startup
    #[serde(default)]
    pub initial_text: String,
    /// Location `/saveEngIntro` redirects to after saving
    #[serde(default = "default_redirect_to")]
    pub redirect_to: String,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            initial_text: String::new(),
            redirect_to: default_redirect_to(),
        }
    }
}

fn default_redirect_to() -> String {
    "/".to_string()
}
