use gpui::{canvas, App, Bounds, ParentElement, Pixels, Styled as _, Window};

pub(crate) trait ElementExt: ParentElement + Sized {
    /// Report the element bounds on every prepaint, pointer math uses them to
    /// map positions into the element.
    fn on_prepaint<F>(self, f: F) -> Self
    where
        F: FnOnce(Bounds<Pixels>, &mut Window, &mut App) + 'static,
    {
        self.child(
            canvas(
                move |bounds, window, cx| f(bounds, window, cx),
                |_, _, _, _| {},
            )
            .absolute()
            .size_full(),
        )
    }
}

impl<T: ParentElement> ElementExt for T {}
