use gpui::{
    div, px, AnyElement, App, ElementId, InteractiveElement as _, IntoElement, ParentElement,
    RenderOnce, SharedString, Styled, Window,
};
use gpui_component::{h_flex, scroll::ScrollableElement as _, v_flex, ActiveTheme, StyledExt};

/// Page shell with a header, a scrolling column of controls and a preview
/// pane for the component being configured.
#[derive(IntoElement)]
pub struct Dashboard {
    id: ElementId,
    title: SharedString,
    description: SharedString,
    controls: Vec<AnyElement>,
    component: Option<AnyElement>,
}

impl Dashboard {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            title: SharedString::default(),
            description: SharedString::default(),
            controls: Vec::new(),
            component: None,
        }
    }

    pub fn title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.description = description.into();
        self
    }

    pub fn control(mut self, control: impl IntoElement) -> Self {
        self.controls.push(control.into_any_element());
        self
    }

    pub fn controls(mut self, controls: impl IntoIterator<Item = impl IntoElement>) -> Self {
        self.controls
            .extend(controls.into_iter().map(|c| c.into_any_element()));
        self
    }

    /// The previewed component.
    pub fn component(mut self, component: impl IntoElement) -> Self {
        self.component = Some(component.into_any_element());
        self
    }
}

impl RenderOnce for Dashboard {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        v_flex()
            .id(self.id)
            .size_full()
            .bg(cx.theme().background)
            .child(
                v_flex()
                    .gap_1()
                    .p_4()
                    .border_b_1()
                    .border_color(cx.theme().border)
                    .child(div().text_lg().font_semibold().child(self.title))
                    .child(
                        div()
                            .text_sm()
                            .text_color(cx.theme().muted_foreground)
                            .child(self.description),
                    ),
            )
            .child(
                h_flex()
                    .flex_1()
                    .min_h_0()
                    .items_start()
                    .child(
                        v_flex()
                            .id("controls")
                            .h_full()
                            .min_w(px(300.))
                            .border_r_2()
                            .border_color(cx.theme().border)
                            .overflow_y_scrollbar()
                            .items_center()
                            .gap_4()
                            .p_4()
                            .children(self.controls),
                    )
                    .child(
                        v_flex()
                            .id("component")
                            .flex_1()
                            .h_full()
                            .p_2()
                            .items_center()
                            .justify_center()
                            .overflow_hidden()
                            .children(self.component),
                    ),
            )
    }
}
