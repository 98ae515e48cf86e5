use std::rc::Rc;

use gpui::{App, AppContext as _, Entity};

/// The host side of a control: how to read the current value and how to
/// commit a new one.
///
/// Controls never keep their own copy of the value. `set` may be called many
/// times during a single gesture, for example on every pointer move.
pub struct ControlValue<T> {
    get: Rc<dyn Fn(&App) -> T>,
    set: Rc<dyn Fn(T, &mut App)>,
}

impl<T> Clone for ControlValue<T> {
    fn clone(&self) -> Self {
        Self {
            get: self.get.clone(),
            set: self.set.clone(),
        }
    }
}

impl<T: 'static> ControlValue<T> {
    pub fn new(
        get: impl Fn(&App) -> T + 'static,
        set: impl Fn(T, &mut App) + 'static,
    ) -> Self {
        Self {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    /// Bind one field of an entity, notifying its observers on every set.
    pub fn bind<S: 'static>(
        entity: &Entity<S>,
        get: impl Fn(&S) -> T + 'static,
        set: impl Fn(&mut S, T) + 'static,
    ) -> Self {
        let reader = entity.clone();
        let writer = entity.clone();
        Self::new(
            move |cx| get(reader.read(cx)),
            move |value, cx| {
                writer.update(cx, |state, cx| {
                    set(state, value);
                    cx.notify();
                })
            },
        )
    }

    pub fn get(&self, cx: &App) -> T {
        (self.get)(cx)
    }

    pub fn set(&self, value: T, cx: &mut App) {
        (self.set)(value, cx)
    }
}

/// A record of control values shared by a group of controls.
///
/// Each control is bound to one field through [`ControlState::field`], and a
/// write replaces that field only.
pub struct ControlState<S> {
    entity: Entity<S>,
}

impl<S> Clone for ControlState<S> {
    fn clone(&self) -> Self {
        Self {
            entity: self.entity.clone(),
        }
    }
}

impl<S: 'static> ControlState<S> {
    pub fn new(initial: S, cx: &mut App) -> Self {
        Self {
            entity: cx.new(|_| initial),
        }
    }

    /// The backing entity, observe it to re-render on changes.
    pub fn entity(&self) -> &Entity<S> {
        &self.entity
    }

    pub fn read<'a>(&self, cx: &'a App) -> &'a S {
        self.entity.read(cx)
    }

    /// Set one field of the record.
    pub fn set_field(&self, cx: &mut App, update: impl FnOnce(&mut S)) {
        self.entity.update(cx, |state, cx| {
            update(state);
            cx.notify();
        });
    }

    pub fn field<T: 'static>(
        &self,
        get: impl Fn(&S) -> T + 'static,
        set: impl Fn(&mut S, T) + 'static,
    ) -> ControlValue<T> {
        ControlValue::bind(&self.entity, get, set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpui::TestAppContext;

    #[derive(Clone, Debug, PartialEq)]
    struct Demo {
        count: f64,
        label: String,
    }

    fn demo() -> Demo {
        Demo {
            count: 1.,
            label: "hello".into(),
        }
    }

    #[gpui::test]
    fn test_field_binding(cx: &mut TestAppContext) {
        let state = cx.update(|cx| ControlState::new(demo(), cx));
        let count = state.field(|s| s.count, |s, v| s.count = v);
        let label = state.field(|s| s.label.clone(), |s, v| s.label = v);

        assert_eq!(cx.read(|cx| count.get(cx)), 1.);
        cx.update(|cx| count.set(5., cx));
        assert_eq!(cx.read(|cx| count.get(cx)), 5.);

        // Other fields are left alone.
        assert_eq!(cx.read(|cx| label.get(cx)), "hello");

        cx.update(|cx| state.set_field(cx, |s| s.label = "world".into()));
        assert_eq!(
            cx.read(|cx| state.read(cx).clone()),
            Demo {
                count: 5.,
                label: "world".into()
            }
        );
    }

    #[gpui::test]
    fn test_custom_value(cx: &mut TestAppContext) {
        let store = Rc::new(std::cell::Cell::new(0_u8));
        let value = ControlValue::new(
            {
                let store = store.clone();
                move |_| store.get()
            },
            {
                let store = store.clone();
                move |v, _| store.set(v)
            },
        );

        let cloned = value.clone();
        cx.update(|cx| cloned.set(7, cx));
        assert_eq!(cx.read(|cx| value.get(cx)), 7);
        assert_eq!(store.get(), 7);
    }
}
