// Star icon handle - the controller's only view of the page
use crate::config::IndicatorConfig;
use crate::models::IndicatorState;

/// Selector of the icon element on the cafe detail page.
pub const STAR_SELECTOR: &str = "#like-star > i";

/// Something that can display the like indicator.
pub trait IndicatorHandle: Send {
    fn set_state(&mut self, state: IndicatorState);
    fn state(&self) -> Option<IndicatorState>;
}

/// Class-list model of the `<i>` star element.
///
/// Rendering replaces the star classes wholesale, so the icon never carries
/// the filled and empty classes at the same time. Unrelated classes survive.
#[derive(Debug, Clone)]
pub struct StarIcon {
    classes: Vec<String>,
    filled_class: String,
    empty_class: String,
    state: Option<IndicatorState>,
}

impl StarIcon {
    pub fn new(config: &IndicatorConfig) -> Self {
        Self {
            classes: Vec::new(),
            filled_class: config.filled_class.clone(),
            empty_class: config.empty_class.clone(),
            state: None,
        }
    }

    pub fn with_classes(config: &IndicatorConfig, existing: &[&str]) -> Self {
        let mut icon = Self::new(config);
        for class in existing {
            icon.add_class(class);
        }
        icon
    }

    pub fn selector(&self) -> &'static str {
        STAR_SELECTOR
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// `class` attribute as it would appear in the markup.
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    fn add_class(&mut self, class: &str) {
        for token in class.split_whitespace() {
            if !self.has_class(token) {
                self.classes.push(token.to_string());
            }
        }
    }

    fn remove_class(&mut self, class: &str) {
        let tokens: Vec<&str> = class.split_whitespace().collect();
        self.classes.retain(|c| !tokens.contains(&c.as_str()));
    }

    fn class_for(&self, state: IndicatorState) -> String {
        match state {
            IndicatorState::Filled => self.filled_class.clone(),
            IndicatorState::Empty => self.empty_class.clone(),
        }
    }
}

impl IndicatorHandle for StarIcon {
    fn set_state(&mut self, state: IndicatorState) {
        let stale = self.class_for(state.flipped());
        let fresh = self.class_for(state);
        self.remove_class(&stale);
        self.add_class(&fresh);
        self.state = Some(state);
    }

    fn state(&self) -> Option<IndicatorState> {
        self.state
    }
}
