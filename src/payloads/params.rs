use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct HintParams {
    #[serde(rename = "hintType")]
    pub hint_type: Option<String>,
}

/// Reveal endpoints hand out the answer only to a client that reports a win.
#[derive(Deserialize, Debug)]
pub struct RevealParams {
    pub has_won: Option<bool>,
}

impl RevealParams {
    pub fn has_won(&self) -> bool {
        self.has_won.unwrap_or(false)
    }
}
