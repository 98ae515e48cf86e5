use gpui::{
    div, prelude::FluentBuilder as _, px, App, ElementId, InteractiveElement as _, IntoElement,
    ParentElement as _, Pixels, RenderOnce, SharedString, StatefulInteractiveElement as _,
    Styled as _, Window,
};
use gpui_component::{h_flex, ActiveTheme as _, StyledExt as _};

use crate::{binding::ControlValue, card::ControlCard};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToggleSize {
    #[default]
    Default,
    Large,
}

impl ToggleSize {
    fn track_height(&self) -> Pixels {
        match self {
            Self::Default => px(32.),
            Self::Large => px(40.),
        }
    }

    fn segment_width(&self) -> Pixels {
        match self {
            Self::Default => px(60.),
            Self::Large => px(68.),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToggleOptions {
    pub disabled: bool,
    /// Default is `ON`.
    pub on_label: SharedString,
    /// Default is `OFF`.
    pub off_label: SharedString,
    pub size: ToggleSize,
}

impl Default for ToggleOptions {
    fn default() -> Self {
        Self {
            disabled: false,
            on_label: "ON".into(),
            off_label: "OFF".into(),
            size: ToggleSize::Default,
        }
    }
}

impl ToggleOptions {
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn labels(mut self, on: impl Into<SharedString>, off: impl Into<SharedString>) -> Self {
        self.on_label = on.into();
        self.off_label = off.into();
        self
    }

    pub fn size(mut self, size: ToggleSize) -> Self {
        self.size = size;
        self
    }
}

/// Value to commit after clicking the `target` side, `None` when that side
/// is already active.
pub fn toggle_target(current: bool, target: bool) -> Option<bool> {
    (current != target).then_some(target)
}

/// A two segment ON/OFF switch.
#[derive(IntoElement)]
pub struct BoolToggle {
    id: ElementId,
    title: SharedString,
    description: SharedString,
    value: ControlValue<bool>,
    options: ToggleOptions,
}

impl BoolToggle {
    pub fn new(
        id: impl Into<ElementId>,
        title: impl Into<SharedString>,
        value: ControlValue<bool>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: SharedString::default(),
            value,
            options: ToggleOptions::default(),
        }
    }

    pub fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.description = description.into();
        self
    }

    pub fn options(mut self, options: ToggleOptions) -> Self {
        self.options = options;
        self
    }
}

impl RenderOnce for BoolToggle {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let current = self.value.get(cx);
        let size = self.options.size;
        let disabled = self.options.disabled;

        let segment = |id: &'static str, label: SharedString, target: bool, cx: &App| {
            let active = current == target;
            let value = self.value.clone();

            div()
                .id(id)
                .flex()
                .items_center()
                .justify_center()
                .h(size.track_height() - px(8.))
                .min_w(size.segment_width())
                .px_3()
                .rounded(cx.theme().radius)
                .font_medium()
                .map(|this| match size {
                    ToggleSize::Default => this.text_xs(),
                    ToggleSize::Large => this.text_sm(),
                })
                .when(active, |this| {
                    this.bg(cx.theme().background)
                        .shadow_sm()
                        .text_color(cx.theme().foreground)
                })
                .when(!active, |this| {
                    this.text_color(cx.theme().muted_foreground)
                        .hover(|this| this.text_color(cx.theme().foreground))
                })
                .when(!disabled, |this| {
                    this.cursor_pointer().on_click(move |_, _, cx| {
                        let current = value.get(cx);
                        if let Some(next) = toggle_target(current, target) {
                            value.set(next, cx);
                        }
                    })
                })
                .child(label)
        };

        let off = segment("off", self.options.off_label.clone(), false, cx);
        let on = segment("on", self.options.on_label.clone(), true, cx);

        ControlCard::new(self.id.clone(), self.title.clone())
            .description(self.description.clone())
            .child(
                h_flex()
                    .id("track")
                    .h(size.track_height())
                    .px_1()
                    .gap_1()
                    .rounded(cx.theme().radius)
                    .border_1()
                    .border_color(cx.theme().border)
                    .bg(cx.theme().muted)
                    .when(disabled, |this| this.opacity(0.5))
                    .child(off)
                    .child(on),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_target() {
        assert_eq!(toggle_target(false, true), Some(true));
        assert_eq!(toggle_target(true, false), Some(false));
        assert_eq!(toggle_target(true, true), None);
        assert_eq!(toggle_target(false, false), None);
    }

    #[test]
    fn test_default_options() {
        let options = ToggleOptions::default();
        assert_eq!(options.on_label, SharedString::from("ON"));
        assert_eq!(options.off_label, SharedString::from("OFF"));
        assert_eq!(options.size, ToggleSize::Default);
        assert!(!options.disabled);

        let options = options.labels("Yes", "No").size(ToggleSize::Large);
        assert_eq!(options.on_label, SharedString::from("Yes"));
        assert_eq!(options.size.track_height(), px(40.));
    }
}
