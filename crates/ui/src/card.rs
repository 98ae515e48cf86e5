use std::rc::Rc;

use gpui::{
    prelude::FluentBuilder, AnyElement, App, ClickEvent, ElementId, InteractiveElement,
    IntoElement, ParentElement, RenderOnce, SharedString, StatefulInteractiveElement,
    StyleRefinement, Styled, Window,
};
use gpui_component::{h_flex, v_flex, ActiveTheme, Icon, IconName, Sizable, StyledExt};

/// The frame shared by every control: title, description and body.
///
/// A card becomes collapsible once [`ControlCard::collapsed`] is set, the
/// header then toggles through [`ControlCard::on_toggle`].
#[derive(IntoElement)]
pub struct ControlCard {
    id: ElementId,
    title: SharedString,
    description: Option<SharedString>,
    icon: Option<Icon>,
    suffix: Option<AnyElement>,
    collapsed: Option<bool>,
    on_toggle: Option<Rc<dyn Fn(&ClickEvent, &mut Window, &mut App)>>,
    children: Vec<AnyElement>,
    style: StyleRefinement,
}

impl ControlCard {
    pub fn new(id: impl Into<ElementId>, title: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            icon: None,
            suffix: None,
            collapsed: None,
            on_toggle: None,
            children: Vec::new(),
            style: StyleRefinement::default(),
        }
    }

    pub fn description(mut self, description: impl Into<SharedString>) -> Self {
        let description = description.into();
        if !description.is_empty() {
            self.description = Some(description);
        }
        self
    }

    pub fn icon(mut self, icon: impl Into<Icon>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// An element placed at the end of the header row.
    pub fn suffix(mut self, suffix: impl IntoElement) -> Self {
        self.suffix = Some(suffix.into_any_element());
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    pub fn on_toggle(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_toggle = Some(Rc::new(handler));
        self
    }
}

impl ParentElement for ControlCard {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl Styled for ControlCard {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for ControlCard {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let collapsed = self.collapsed.unwrap_or(false);
        let on_toggle = self.on_toggle.clone();

        v_flex()
            .id(self.id)
            .w_full()
            .p_4()
            .gap_4()
            .rounded(cx.theme().radius)
            .border_1()
            .border_color(cx.theme().border)
            .bg(cx.theme().background)
            .refine_style(&self.style)
            .child(
                h_flex()
                    .id("header")
                    .gap_2()
                    .justify_between()
                    .items_start()
                    .child(
                        v_flex()
                            .gap_1()
                            .child(
                                h_flex()
                                    .gap_2()
                                    .text_sm()
                                    .font_semibold()
                                    .when_some(self.icon, |this, icon| {
                                        this.child(icon.small())
                                    })
                                    .child(self.title),
                            )
                            .when_some(self.description, |this, description| {
                                this.child(
                                    gpui::div()
                                        .text_xs()
                                        .text_color(cx.theme().muted_foreground)
                                        .child(description),
                                )
                            }),
                    )
                    .child(
                        h_flex()
                            .gap_2()
                            .text_xs()
                            .text_color(cx.theme().muted_foreground)
                            .children(self.suffix)
                            .when(self.collapsed.is_some(), |this| {
                                this.child(
                                    Icon::new(if collapsed {
                                        IconName::ChevronDown
                                    } else {
                                        IconName::ChevronUp
                                    })
                                    .small(),
                                )
                            }),
                    )
                    .when_some(on_toggle, |this, on_toggle| {
                        this.cursor_pointer()
                            .on_click(move |event, window, cx| on_toggle(event, window, cx))
                    }),
            )
            .when(!collapsed, |this| {
                this.child(v_flex().gap_2().children(self.children))
            })
    }
}
