use serde::{Deserialize, Serialize};

/// How many cards a turn of the stock moves onto the waste.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DrawMode {
    One,
    Three,
}

impl DrawMode {
    pub fn count(&self) -> usize {
        match self {
            DrawMode::One => 1,
            DrawMode::Three => 3,
        }
    }
}

impl Default for DrawMode {
    fn default() -> Self {
        DrawMode::One
    }
}

/// Automatic moves a front end can opt into.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct AutoplayConfig {
    /// Send the waste top to the first tableau column that takes it.
    pub from_waste: bool,
    /// Send a tableau run to the first other column that takes it.
    pub from_tableau: bool,
    /// Prefer the foundation when a single card can go there.
    pub to_foundation: bool,
    /// Flip a column's hidden top once its visible cards are gone.
    pub closed_tableau_top: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            from_waste: false,
            from_tableau: false,
            to_foundation: true,
            closed_tableau_top: true,
        }
    }
}

impl AutoplayConfig {
    /// Every automatic move switched off.
    pub fn manual() -> Self {
        Self {
            from_waste: false,
            from_tableau: false,
            to_foundation: false,
            closed_tableau_top: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub draw: DrawMode,
    pub autoplay: AutoplayConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reveal_and_prefer_foundation() {
        let config = GameConfig::default();
        assert_eq!(config.draw, DrawMode::One);
        assert!(config.autoplay.closed_tableau_top);
        assert!(config.autoplay.to_foundation);
        assert!(!config.autoplay.from_waste);
        assert!(!config.autoplay.from_tableau);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let autoplay: AutoplayConfig = serde_json::from_str(r#"{"from_waste": true}"#).unwrap();
        assert!(autoplay.from_waste);
        assert!(autoplay.to_foundation);
        assert!(autoplay.closed_tableau_top);

        let config: GameConfig = serde_json::from_str(r#"{"draw": "Three"}"#).unwrap();
        assert_eq!(config.draw.count(), 3);
        assert_eq!(config.autoplay, AutoplayConfig::default());
    }

    #[test]
    fn round_trips_through_json() {
        let config = GameConfig {
            draw: DrawMode::Three,
            autoplay: AutoplayConfig::manual(),
        };
        let text = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
