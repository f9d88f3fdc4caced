#![forbid(unsafe_code)]

//! Dialog configuration.
//!
//! [`DialogConfig`] is an immutable-per-render value object: the controller
//! reads it when mounting and never writes it back. Class tokens and inline
//! style pairs composed here are handed to the external style layer as
//! plain strings; nothing in this crate interprets them.

/// Dialog mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DialogMode {
    /// Backdrop blocks the page and scroll is locked while open.
    #[default]
    Modal,
    /// Rendered without a backdrop; the page stays interactive.
    NonModal,
}

/// Vertical placement variant, emitted as a class token suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// Pinned near the top of the host.
    Top,
    /// Centered in the host.
    Center,
}

impl Placement {
    /// The token suffix the style layer matches on.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
        }
    }
}

/// Margin offset for the dialog surface. Each axis is independently
/// optional; an absent axis resolves to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    /// Top margin.
    pub top: Option<i32>,
    /// Left margin.
    pub left: Option<i32>,
}

impl Offset {
    /// Create an offset with both axes set.
    #[must_use]
    pub const fn new(top: i32, left: i32) -> Self {
        Self {
            top: Some(top),
            left: Some(left),
        }
    }

    /// Resolved `(top, left)` with absent axes defaulted to 0.
    #[must_use]
    pub const fn resolved(self) -> (i32, i32) {
        (
            match self.top {
                Some(v) => v,
                None => 0,
            },
            match self.left {
                Some(v) => v,
                None => 0,
            },
        )
    }
}

/// Dialog configuration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogConfig {
    /// Modal or non-modal behavior.
    pub mode: DialogMode,
    /// Placement variant token; `None` emits no placement token.
    pub placement: Option<Placement>,
    /// Surface width.
    pub width: Option<u32>,
    /// Surface height.
    pub height: Option<u32>,
    /// Inline style overrides appended after the computed pairs
    /// (last write wins at the style layer).
    pub style: Vec<(String, String)>,
    /// Margin offset.
    pub offset: Option<Offset>,
    /// Stacking order for the wrapper.
    pub z_index: Option<i32>,
    /// Unmount the surface after the exit transition instead of hiding it.
    pub destroy_on_close: bool,
    /// Render the backdrop (modal mode only).
    pub show_overlay: bool,
    /// Extra class token on the wrapper.
    pub class: Option<String>,
    /// Class prefix all tokens are derived from.
    pub prefix: String,
    /// Header slot content.
    pub header: Option<String>,
    /// Body slot content.
    pub body: Option<String>,
    /// Footer slot content.
    pub footer: Option<String>,
    /// Close-affordance slot content; `None` renders no closer.
    pub close_btn: Option<String>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            mode: DialogMode::default(),
            placement: None,
            width: None,
            height: None,
            style: Vec::new(),
            offset: None,
            z_index: None,
            destroy_on_close: false,
            show_overlay: true,
            class: None,
            prefix: "veil-dialog".to_string(),
            header: None,
            body: None,
            footer: None,
            close_btn: None,
        }
    }
}

impl DialogConfig {
    /// Create a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dialog mode.
    #[must_use]
    pub fn mode(mut self, mode: DialogMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the placement variant.
    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Set the surface width.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the surface height.
    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Append an inline style override.
    #[must_use]
    pub fn style_override(
        mut self,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.style.push((property.into(), value.into()));
        self
    }

    /// Set the margin offset.
    #[must_use]
    pub fn offset(mut self, offset: Offset) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the wrapper z-index.
    #[must_use]
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Set destroy-on-close behavior.
    #[must_use]
    pub fn destroy_on_close(mut self, destroy: bool) -> Self {
        self.destroy_on_close = destroy;
        self
    }

    /// Set whether the backdrop is rendered in modal mode.
    #[must_use]
    pub fn show_overlay(mut self, show: bool) -> Self {
        self.show_overlay = show;
        self
    }

    /// Set an extra wrapper class token.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the class prefix.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the header slot.
    #[must_use]
    pub fn header(mut self, content: impl Into<String>) -> Self {
        self.header = Some(content.into());
        self
    }

    /// Set the body slot.
    #[must_use]
    pub fn body(mut self, content: impl Into<String>) -> Self {
        self.body = Some(content.into());
        self
    }

    /// Set the footer slot.
    #[must_use]
    pub fn footer(mut self, content: impl Into<String>) -> Self {
        self.footer = Some(content.into());
        self
    }

    /// Set the close-affordance slot.
    #[must_use]
    pub fn close_btn(mut self, content: impl Into<String>) -> Self {
        self.close_btn = Some(content.into());
        self
    }

    /// Whether this configuration renders a backdrop.
    #[must_use]
    pub fn has_mask(&self) -> bool {
        self.mode == DialogMode::Modal && self.show_overlay
    }

    // --- Class token composition (consumed by the style layer) ---

    /// Tokens for the dialog surface: prefix, default variant, placement.
    #[must_use]
    pub fn dialog_classes(&self) -> Vec<String> {
        let mut classes = vec![self.prefix.clone(), format!("{}--default", self.prefix)];
        if let Some(placement) = self.placement {
            classes.push(format!("{}--{}", self.prefix, placement.token()));
        }
        classes
    }

    /// Tokens for the root wrapper.
    #[must_use]
    pub fn wrapper_classes(&self) -> Vec<String> {
        let mut classes = Vec::new();
        if let Some(class) = &self.class {
            classes.push(class.clone());
        }
        classes.push(format!("{}-ctx", self.prefix));
        classes
    }

    /// Token for the backdrop.
    #[must_use]
    pub fn mask_class(&self) -> String {
        format!("{}-mask", self.prefix)
    }

    /// Token for a named slot (`header`, `body`, `footer`, `close`).
    #[must_use]
    pub fn slot_class(&self, slot: &str) -> String {
        format!("{}__{}", self.prefix, slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_modal_with_overlay() {
        let config = DialogConfig::default();
        assert_eq!(config.mode, DialogMode::Modal);
        assert!(config.show_overlay);
        assert!(!config.destroy_on_close);
        assert!(config.has_mask());
        assert_eq!(config.prefix, "veil-dialog");
    }

    #[test]
    fn non_modal_never_has_mask() {
        let config = DialogConfig::new().mode(DialogMode::NonModal);
        assert!(!config.has_mask());
        let config = config.show_overlay(true);
        assert!(!config.has_mask());
    }

    #[test]
    fn modal_without_overlay_has_no_mask() {
        let config = DialogConfig::new().show_overlay(false);
        assert!(!config.has_mask());
    }

    #[test]
    fn offset_axes_default_to_zero() {
        let offset = Offset {
            top: Some(12),
            left: None,
        };
        assert_eq!(offset.resolved(), (12, 0));
        assert_eq!(Offset::default().resolved(), (0, 0));
        assert_eq!(Offset::new(3, 4).resolved(), (3, 4));
    }

    #[test]
    fn dialog_classes_include_placement() {
        let config = DialogConfig::new().placement(Placement::Top);
        assert_eq!(
            config.dialog_classes(),
            vec![
                "veil-dialog".to_string(),
                "veil-dialog--default".to_string(),
                "veil-dialog--top".to_string(),
            ]
        );

        let config = DialogConfig::new();
        assert_eq!(config.dialog_classes().len(), 2);
    }

    #[test]
    fn wrapper_classes_include_user_class() {
        let config = DialogConfig::new().class("my-dialog");
        assert_eq!(
            config.wrapper_classes(),
            vec!["my-dialog".to_string(), "veil-dialog-ctx".to_string()]
        );
        assert_eq!(
            DialogConfig::new().wrapper_classes(),
            vec!["veil-dialog-ctx".to_string()]
        );
    }

    #[test]
    fn prefix_flows_through_tokens() {
        let config = DialogConfig::new().prefix("t-dialog");
        assert_eq!(config.mask_class(), "t-dialog-mask");
        assert_eq!(config.slot_class("header"), "t-dialog__header");
        assert_eq!(config.dialog_classes()[0], "t-dialog");
    }

    #[test]
    fn builder_chain() {
        let config = DialogConfig::new()
            .mode(DialogMode::NonModal)
            .placement(Placement::Center)
            .width(480)
            .height(320)
            .offset(Offset::new(40, 0))
            .z_index(2500)
            .destroy_on_close(true)
            .show_overlay(false)
            .class("warn")
            .header("Delete file?")
            .body("This action cannot be undone.")
            .footer("footer")
            .close_btn("x")
            .style_override("border-radius", "6");
        assert_eq!(config.mode, DialogMode::NonModal);
        assert_eq!(config.placement, Some(Placement::Center));
        assert_eq!(config.width, Some(480));
        assert_eq!(config.height, Some(320));
        assert_eq!(config.z_index, Some(2500));
        assert!(config.destroy_on_close);
        assert_eq!(config.header.as_deref(), Some("Delete file?"));
        assert_eq!(config.style.len(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_roundtrips_through_json() {
        let config = DialogConfig::new()
            .placement(Placement::Top)
            .width(500)
            .offset(Offset {
                top: Some(80),
                left: None,
            })
            .destroy_on_close(true);
        let json = serde_json::to_string(&config).unwrap();
        let back: DialogConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.placement, Some(Placement::Top));
        assert_eq!(back.width, Some(500));
        assert_eq!(back.offset.unwrap().resolved(), (80, 0));
        assert!(back.destroy_on_close);
    }
}
