use gpui::{
    div, prelude::FluentBuilder as _, px, AppContext as _, ClickEvent, Context, DragMoveEvent,
    Entity, EntityId, InteractiveElement as _, IntoElement, MouseButton, ParentElement as _,
    Render, SharedString, StatefulInteractiveElement as _, Styled as _, Subscription, Task,
    Window,
};
use gpui_component::{
    button::{Button, ButtonVariants as _},
    h_flex,
    input::{Input, InputEvent, InputState},
    v_flex, ActiveTheme as _, Disableable as _, Icon, IconName, Sizable as _,
};

use crate::{
    binding::ControlValue,
    card::ControlCard,
    reorder::{ListEditor, ListItem},
    validate::{NumberRange, TextLimit},
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArrayOptions<C> {
    pub placeholder: Option<SharedString>,
    /// Rules a new or edited item must satisfy.
    pub constraint: C,
}

impl<C> ArrayOptions<C> {
    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn constraint(mut self, constraint: C) -> Self {
        self.constraint = constraint;
        self
    }
}

pub type NumberArray = ArrayControl<f64>;
pub type NumberArrayOptions = ArrayOptions<NumberRange>;
pub type TextArray = ArrayControl<String>;
pub type TextArrayOptions = ArrayOptions<TextLimit>;

/// Dragged row, `ix` is the row position when the drag started.
#[derive(Clone)]
struct DragRow {
    owner: EntityId,
    ix: usize,
    label: SharedString,
}

impl Render for DragRow {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .px_3()
            .py_1()
            .rounded(cx.theme().radius)
            .border_1()
            .border_color(cx.theme().border)
            .bg(cx.theme().background)
            .shadow_md()
            .text_sm()
            .child(self.label.clone())
    }
}

/// Collapsible editor for an ordered list of numbers or strings, with add,
/// inline edit, delete and drag reorder.
pub struct ArrayControl<T: ListItem> {
    title: SharedString,
    description: SharedString,
    value: ControlValue<Vec<T>>,
    editor: ListEditor<T>,
    open: bool,
    add_input: Entity<InputState>,
    edit_input: Entity<InputState>,
    _reorder_task: Option<Task<()>>,
    _subscriptions: Vec<Subscription>,
}

impl<T: ListItem> ArrayControl<T> {
    pub fn new(
        title: impl Into<SharedString>,
        value: ControlValue<Vec<T>>,
        options: ArrayOptions<T::Constraint>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let placeholder = options
            .placeholder
            .unwrap_or_else(|| SharedString::from("Enter a value to add"));
        let add_input = cx.new(|cx| InputState::new(window, cx).placeholder(placeholder));
        let edit_input = cx.new(|cx| InputState::new(window, cx));

        let _subscriptions = vec![
            cx.subscribe_in(&add_input, window, Self::on_add_input_event),
            cx.subscribe_in(&edit_input, window, Self::on_edit_input_event),
        ];

        Self {
            title: title.into(),
            description: SharedString::default(),
            value,
            editor: ListEditor::new(options.constraint),
            open: false,
            add_input,
            edit_input,
            _reorder_task: None,
            _subscriptions,
        }
    }

    pub fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.description = description.into();
        self
    }

    /// Start expanded.
    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    fn on_add_input_event(
        &mut self,
        input: &Entity<InputState>,
        event: &InputEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        match event {
            InputEvent::Change => {
                let text = input.read(cx).value().to_string();
                if text == self.editor.pending_text() {
                    return;
                }

                if !self.editor.set_pending(&text) {
                    let pending = self.editor.pending_text().to_string();
                    input.update(cx, |input, cx| input.set_value(pending, window, cx));
                }
                cx.notify();
            }
            InputEvent::PressEnter { .. } => self.add(window, cx),
            _ => {}
        }
    }

    fn on_edit_input_event(
        &mut self,
        input: &Entity<InputState>,
        event: &InputEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let Some(buffer) = self.editor.editing().map(|(_, buffer)| buffer.to_string()) else {
            return;
        };

        match event {
            InputEvent::Change => {
                let text = input.read(cx).value().to_string();
                if text == buffer {
                    return;
                }

                if !self.editor.set_edit_buffer(&text) {
                    input.update(cx, |input, cx| input.set_value(buffer, window, cx));
                }
            }
            InputEvent::PressEnter { .. } => self.save_edit(window, cx),
            _ => {}
        }
    }

    fn toggle_open(&mut self, _: &ClickEvent, _: &mut Window, cx: &mut Context<Self>) {
        self.open = !self.open;
        cx.notify();
    }

    fn add(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let items = self.value.get(cx);
        if let Some(next) = self.editor.commit_add(&items) {
            self.value.set(next, cx);
            self.add_input
                .update(cx, |input, cx| input.set_value("", window, cx));
        }
        cx.notify();
    }

    fn begin_edit(&mut self, ix: usize, window: &mut Window, cx: &mut Context<Self>) {
        let items = self.value.get(cx);
        if !self.editor.begin_edit(ix, &items) {
            return;
        }

        let buffer = self
            .editor
            .editing()
            .map(|(_, buffer)| buffer.to_string())
            .unwrap_or_default();
        self.edit_input.update(cx, |input, cx| {
            input.set_value(buffer, window, cx);
            input.focus(window, cx);
        });
        cx.notify();
    }

    fn save_edit(&mut self, _: &mut Window, cx: &mut Context<Self>) {
        let items = self.value.get(cx);
        if let Some(next) = self.editor.save_edit(&items) {
            self.value.set(next, cx);
        }
        cx.notify();
    }

    fn cancel_edit(&mut self, _: &mut Window, cx: &mut Context<Self>) {
        self.editor.cancel_edit();
        cx.notify();
    }

    fn delete(&mut self, ix: usize, _: &mut Window, cx: &mut Context<Self>) {
        let items = self.value.get(cx);
        if let Some(next) = self.editor.delete(ix, &items) {
            self.value.set(next, cx);
        }
        cx.notify();
    }

    fn drag_start(&mut self, ix: usize, cx: &mut Context<Self>) {
        self._reorder_task = None;
        self.editor.drag_start(ix);
        cx.notify();
    }

    fn on_drag_move(
        &mut self,
        event: &DragMoveEvent<DragRow>,
        ix: usize,
        cx: &mut Context<Self>,
    ) {
        if event.drag(cx).owner != cx.entity_id() {
            return;
        }
        if !event.bounds.contains(&event.event.position) {
            return;
        }

        self.drag_over(ix, cx);
    }

    /// The pointer is over row `ix` during a drag.
    fn drag_over(&mut self, ix: usize, cx: &mut Context<Self>) {
        let now = cx.background_executor().now();
        let Some(due) = self.editor.drag_enter(ix, now) else {
            return;
        };

        // Replacing the task cancels the previous timer.
        self._reorder_task = Some(cx.spawn(async move |this, cx| {
            let executor = cx.background_executor().clone();
            executor
                .timer(due.saturating_duration_since(executor.now()))
                .await;
            this.update(cx, |this, cx| this.apply_due_move(cx)).ok();
        }));
        cx.notify();
    }

    fn apply_due_move(&mut self, cx: &mut Context<Self>) {
        let items = self.value.get(cx);
        let now = cx.background_executor().now();
        if let Some(next) = self.editor.commit_due(now, &items) {
            self.value.set(next, cx);
            cx.notify();
        }
    }

    fn drag_end(&mut self, cx: &mut Context<Self>) {
        if !self.editor.is_dragging() {
            return;
        }

        self._reorder_task = None;
        self.editor.drag_end();
        cx.notify();
    }

    fn render_row(&self, ix: usize, item: &T, cx: &mut Context<Self>) -> impl IntoElement {
        let label = SharedString::from(item.to_text());
        let editing = self.editor.editing().is_some_and(|(index, _)| index == ix);
        let dragged = self.editor.dragged_index() == Some(ix);
        let over = self.editor.drag_over_index() == Some(ix);
        let owner = cx.entity_id();
        let view = cx.entity();

        h_flex()
            .id(("row", ix))
            .gap_2()
            .rounded(cx.theme().radius)
            .when(dragged, |this| this.opacity(0.5))
            .when(over, |this| this.mt_1())
            .child(
                div()
                    .id(("grip", ix))
                    .px_1()
                    .cursor_grab()
                    .text_color(cx.theme().muted_foreground)
                    .child(Icon::new(IconName::EllipsisVertical).small())
                    .on_drag(
                        DragRow {
                            owner,
                            ix,
                            label: label.clone(),
                        },
                        move |drag, _, _, cx| {
                            cx.stop_propagation();
                            view.update(cx, |this, cx| this.drag_start(drag.ix, cx));
                            cx.new(|_| drag.clone())
                        },
                    ),
            )
            .on_drag_move(cx.listener(move |this, event: &DragMoveEvent<DragRow>, _, cx| {
                this.on_drag_move(event, ix, cx)
            }))
            .map(|this| {
                if editing {
                    this.child(Input::new(&self.edit_input).flex_1()).child(
                        h_flex()
                            .gap_1()
                            .child(
                                Button::new(("save", ix))
                                    .outline()
                                    .small()
                                    .icon(IconName::Check)
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.save_edit(window, cx)
                                    })),
                            )
                            .child(
                                Button::new(("cancel", ix))
                                    .outline()
                                    .small()
                                    .icon(IconName::Close)
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        this.cancel_edit(window, cx)
                                    })),
                            ),
                    )
                } else {
                    this.child(
                        div()
                            .flex_1()
                            .p_2()
                            .text_sm()
                            .rounded(cx.theme().radius)
                            .border_1()
                            .border_color(cx.theme().border)
                            .bg(cx.theme().background)
                            .child(label),
                    )
                    .child(
                        h_flex()
                            .gap_1()
                            .child(
                                Button::new(("edit", ix))
                                    .outline()
                                    .small()
                                    .label("Edit")
                                    .on_click(cx.listener(move |this, _, window, cx| {
                                        this.begin_edit(ix, window, cx)
                                    })),
                            )
                            .child(
                                Button::new(("delete", ix))
                                    .outline()
                                    .small()
                                    .icon(IconName::Delete)
                                    .on_click(cx.listener(move |this, _, window, cx| {
                                        this.delete(ix, window, cx)
                                    })),
                            ),
                    )
                }
            })
    }
}

impl<T: ListItem> Render for ArrayControl<T> {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let items = self.value.get(cx);
        let rows = items
            .iter()
            .enumerate()
            .map(|(ix, item)| self.render_row(ix, item, cx).into_any_element())
            .collect::<Vec<_>>();

        ControlCard::new("array", self.title.clone())
            .description(self.description.clone())
            .suffix(format!("{} items", items.len()))
            .collapsed(!self.open)
            .on_toggle(cx.listener(Self::toggle_open))
            .child(
                h_flex()
                    .gap_2()
                    .child(Input::new(&self.add_input).flex_1())
                    .child(
                        Button::new("add")
                            .outline()
                            .small()
                            .icon(IconName::Plus)
                            .label("Add")
                            .disabled(!self.editor.can_add())
                            .on_click(cx.listener(|this, _, window, cx| this.add(window, cx))),
                    ),
            )
            .child(
                v_flex()
                    .id("rows")
                    .gap_2()
                    .min_h(px(8.))
                    .children(rows)
                    .on_drop(cx.listener(|this, drag: &DragRow, _, cx| {
                        if drag.owner == cx.entity_id() {
                            this.drag_end(cx);
                        }
                    }))
                    // Releasing anywhere else ends the drag too.
                    .on_mouse_up(
                        MouseButton::Left,
                        cx.listener(|this, _, _, cx| this.drag_end(cx)),
                    )
                    .on_mouse_up_out(
                        MouseButton::Left,
                        cx.listener(|this, _, _, cx| this.drag_end(cx)),
                    ),
            )
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use gpui::{TestAppContext, VisualTestContext};

    use super::*;
    use crate::reorder::REORDER_DEBOUNCE;

    fn host(items: &[f64]) -> (Rc<RefCell<Vec<f64>>>, ControlValue<Vec<f64>>) {
        let store = Rc::new(RefCell::new(items.to_vec()));
        let value = ControlValue::new(
            {
                let store = store.clone();
                move |_| store.borrow().clone()
            },
            {
                let store = store.clone();
                move |v, _| *store.borrow_mut() = v
            },
        );
        (store, value)
    }

    fn build(
        cx: &mut TestAppContext,
        value: ControlValue<Vec<f64>>,
    ) -> (Entity<NumberArray>, &mut VisualTestContext) {
        cx.update(|cx| crate::init(cx));
        cx.add_window_view(|window, cx| {
            NumberArray::new("Numbers", value, NumberArrayOptions::default(), window, cx)
                .open(true)
        })
    }

    fn type_text(input: &Entity<InputState>, text: &str, cx: &mut VisualTestContext) {
        input.update_in(cx, |input, window, cx| {
            input.set_value(text.to_string(), window, cx);
            cx.emit(InputEvent::Change);
        });
    }

    fn press_enter(input: &Entity<InputState>, cx: &mut VisualTestContext) {
        input.update(cx, |_, cx| {
            cx.emit(InputEvent::PressEnter { secondary: false });
        });
    }

    #[gpui::test]
    fn test_reorder_waits_for_last_target(cx: &mut TestAppContext) {
        let (store, value) = host(&[1., 2., 3., 4.]);
        let (view, cx) = build(cx, value);

        view.update(cx, |this, cx| {
            this.drag_start(0, cx);
            this.drag_over(1, cx);
        });
        cx.executor().advance_clock(REORDER_DEBOUNCE / 2);
        view.update(cx, |this, cx| this.drag_over(3, cx));

        // The first target's deadline passes without a move.
        cx.executor().advance_clock(REORDER_DEBOUNCE / 2);
        cx.run_until_parked();
        assert_eq!(*store.borrow(), vec![1., 2., 3., 4.]);

        cx.executor().advance_clock(REORDER_DEBOUNCE / 2);
        cx.run_until_parked();
        assert_eq!(*store.borrow(), vec![2., 3., 4., 1.]);
        assert_eq!(
            view.read_with(cx, |this, _| this.editor.dragged_index()),
            Some(3)
        );
    }

    #[gpui::test]
    fn test_repeated_drag_over_keeps_deadline(cx: &mut TestAppContext) {
        let (store, value) = host(&[1., 2., 3.]);
        let (view, cx) = build(cx, value);

        view.update(cx, |this, cx| {
            this.drag_start(0, cx);
            this.drag_over(2, cx);
        });
        cx.executor().advance_clock(REORDER_DEBOUNCE / 2);
        view.update(cx, |this, cx| this.drag_over(2, cx));

        cx.executor().advance_clock(REORDER_DEBOUNCE / 2);
        cx.run_until_parked();
        assert_eq!(*store.borrow(), vec![2., 3., 1.]);
    }

    #[gpui::test]
    fn test_drag_end_cancels_pending_move(cx: &mut TestAppContext) {
        let (store, value) = host(&[1., 2., 3.]);
        let (view, cx) = build(cx, value);

        view.update(cx, |this, cx| {
            this.drag_start(0, cx);
            this.drag_over(2, cx);
            this.drag_end(cx);
            assert!(this._reorder_task.is_none());
            assert!(!this.editor.is_dragging());
        });

        cx.executor().advance_clock(REORDER_DEBOUNCE * 2);
        cx.run_until_parked();
        assert_eq!(*store.borrow(), vec![1., 2., 3.]);
    }

    #[gpui::test]
    fn test_released_control_never_moves(cx: &mut TestAppContext) {
        cx.update(|cx| crate::init(cx));
        let (store, value) = host(&[1., 2., 3.]);
        let cx = cx.add_empty_window();

        let control = cx.update(|window, cx| {
            cx.new(|cx| {
                NumberArray::new("Numbers", value, NumberArrayOptions::default(), window, cx)
            })
        });
        control.update(cx, |this, cx| {
            this.drag_start(0, cx);
            this.drag_over(2, cx);
        });

        let weak = control.downgrade();
        drop(control);
        cx.update(|_, _| {});
        assert!(weak.upgrade().is_none());

        cx.executor().advance_clock(REORDER_DEBOUNCE * 2);
        cx.run_until_parked();
        assert_eq!(*store.borrow(), vec![1., 2., 3.]);
    }

    #[gpui::test]
    fn test_enter_adds_item(cx: &mut TestAppContext) {
        let (store, value) = host(&[1., 2.]);
        let (view, cx) = build(cx, value);
        let input = view.read_with(cx, |this, _| this.add_input.clone());

        type_text(&input, "4.5", cx);
        press_enter(&input, cx);
        assert_eq!(*store.borrow(), vec![1., 2., 4.5]);
        assert_eq!(input.read_with(cx, |input, _| input.value().to_string()), "");

        // Text that is not a number stays in the input and is not added.
        type_text(&input, "abc", cx);
        press_enter(&input, cx);
        assert_eq!(*store.borrow(), vec![1., 2., 4.5]);
        assert_eq!(input.read_with(cx, |input, _| input.value().to_string()), "abc");
    }

    #[gpui::test]
    fn test_enter_saves_edit(cx: &mut TestAppContext) {
        let (store, value) = host(&[1., 2., 3.]);
        let (view, cx) = build(cx, value);
        let input = view.read_with(cx, |this, _| this.edit_input.clone());

        view.update_in(cx, |this, window, cx| this.begin_edit(1, window, cx));
        assert_eq!(input.read_with(cx, |input, _| input.value().to_string()), "2");

        type_text(&input, "7", cx);
        press_enter(&input, cx);
        assert_eq!(*store.borrow(), vec![1., 7., 3.]);
        assert!(view.read_with(cx, |this, _| this.editor.editing().is_none()));
    }
}
