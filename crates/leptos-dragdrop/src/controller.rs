//! DOM controller
//!
//! Drives [`GestureRecognizer`] and [`DragSession`] from pointer events. Handles get a
//! `pointerdown` listener; move/up/cancel are bound once on the window. The dragged row is
//! hidden, never moved, so the DOM owned by the view is intact when the drag ends.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node, PointerEvent};

use crate::gesture::{GestureRecognizer, HoldDragConfig, MoveOutcome, ReleaseOutcome};
use crate::session::{DragSession, Dropped, RowBox};

/// Class of the element wrapping one draggable row.
pub const ROW_CLASS: &str = "item-row";
const PROXY_CLASS: &str = "drag-proxy";
const PLACEHOLDER_CLASS: &str = "drag-placeholder";

/// One mounted drag handle. Allocated per handle so a rebuilt view never
/// inherits a gesture started on the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandleId(u64);

struct Press {
    list_key: String,
    index: usize,
    row: HtmlElement,
    last_y: f64,
    _timer: Timeout,
}

struct ActiveDrag {
    list_key: String,
    session: DragSession,
    row: HtmlElement,
    list: Element,
    proxy: HtmlElement,
    placeholder: HtmlElement,
}

impl ActiveDrag {
    /// Remove proxy and placeholder, show the row again.
    fn tear_down(self) -> (String, DragSession) {
        self.proxy.remove();
        self.placeholder.remove();
        let _ = self.row.style().remove_property("display");
        (self.list_key, self.session)
    }
}

struct Inner {
    gesture: GestureRecognizer<HandleId>,
    next_handle: u64,
    press: Option<Press>,
    active: Option<ActiveDrag>,
    on_drop: Rc<dyn Fn(String, Dropped)>,
}

/// Press-and-hold reorder controller shared by every list on the page.
///
/// Only one gesture runs at a time: a pointer-down while another is pending or
/// dragging is ignored.
#[derive(Clone, Copy)]
pub struct HoldDrag {
    inner: StoredValue<Inner, LocalStorage>,
    /// Handle currently dragging, for styling.
    dragging: RwSignal<Option<HandleId>>,
}

impl HoldDrag {
    /// Create the controller and bind the window listeners for the lifetime of the
    /// current reactive owner. `on_drop(list_key, dropped)` runs after every drag
    /// that ends in a release, including in-place drops.
    pub fn new<F>(config: HoldDragConfig, on_drop: F) -> Self
    where
        F: Fn(String, Dropped) + 'static,
    {
        let dnd = Self {
            inner: StoredValue::new_local(Inner {
                gesture: GestureRecognizer::new(config),
                next_handle: 0,
                press: None,
                active: None,
                on_drop: Rc::new(on_drop),
            }),
            dragging: RwSignal::new(None),
        };

        let on_move = window_event_listener(leptos::ev::pointermove, move |ev: PointerEvent| {
            dnd.pointer_moved(&ev);
        });
        let on_up = window_event_listener(leptos::ev::pointerup, move |_ev: PointerEvent| {
            dnd.release();
        });
        // the browser took the pointer (scroll, system gesture): abandon, never commit
        let on_cancel = window_event_listener(leptos::ev::pointercancel, move |_ev: PointerEvent| {
            dnd.cancel();
        });
        on_cleanup(move || {
            on_move.remove();
            on_up.remove();
            on_cancel.remove();
        });

        dnd
    }

    /// Allocate an id for a newly mounted handle.
    pub fn register_handle(&self) -> HandleId {
        self.inner
            .try_update_value(|inner| {
                inner.next_handle += 1;
                HandleId(inner.next_handle)
            })
            .unwrap_or(HandleId(0))
    }

    pub fn is_dragging(&self, handle: HandleId) -> bool {
        self.dragging.get() == Some(handle)
    }

    /// `pointerdown` on the handle of row `index` in list `list_key`.
    pub fn press(&self, handle: HandleId, list_key: &str, index: usize, ev: &PointerEvent) {
        if ev.button() != 0 {
            return;
        }
        let Some(row) = row_of(ev) else {
            return;
        };
        let y = ev.client_y() as f64;
        let this = *self;

        self.inner.update_value(|inner| {
            let Some(token) = inner.gesture.press(handle, y) else {
                return;
            };
            let delay = inner.gesture.config().hold_delay_ms;
            inner.press = Some(Press {
                list_key: list_key.to_string(),
                index,
                row,
                last_y: y,
                _timer: Timeout::new(delay, move || this.hold_elapsed(token)),
            });
        });
        ev.prevent_default();
    }

    /// A handle is being unmounted: drop any gesture it owns without committing.
    pub fn release_handle(&self, handle: HandleId) {
        let abandoned = self
            .inner
            .try_update_value(|inner| {
                if !inner.gesture.abandon(handle) {
                    return false;
                }
                inner.press = None;
                if let Some(active) = inner.active.take() {
                    active.tear_down();
                }
                true
            })
            .unwrap_or(false);
        if abandoned {
            web_sys::console::log_1(&"[DND] handle removed mid-gesture, abandoned".into());
            self.dragging.set(None);
        }
    }

    /// Abort whatever is in progress, e.g. when editing gets locked.
    pub fn cancel(&self) {
        self.inner.update_value(|inner| {
            inner.gesture.reset();
            inner.press = None;
            if let Some(active) = inner.active.take() {
                active.tear_down();
            }
        });
        self.dragging.set(None);
    }

    fn hold_elapsed(&self, token: crate::gesture::PressToken) {
        let started = self
            .inner
            .try_update_value(|inner| {
                let handle = inner.gesture.hold_elapsed(token)?;
                let press = inner.press.take()?;
                match begin_drag(press) {
                    Some(active) => {
                        inner.active = Some(active);
                        Some(handle)
                    }
                    None => {
                        inner.gesture.reset();
                        None
                    }
                }
            })
            .flatten();
        if let Some(handle) = started {
            self.dragging.set(Some(handle));
        }
    }

    fn pointer_moved(&self, ev: &PointerEvent) {
        let y = ev.client_y() as f64;
        let dragging = self
            .inner
            .try_update_value(|inner| match inner.gesture.pointer_moved(y) {
                MoveOutcome::Ignored => {
                    if let Some(press) = inner.press.as_mut() {
                        press.last_y = y;
                    }
                    false
                }
                MoveOutcome::Cancelled { .. } => {
                    inner.press = None;
                    false
                }
                MoveOutcome::Dragging { .. } => {
                    if let Some(active) = inner.active.as_mut() {
                        follow_pointer(active, y);
                    }
                    true
                }
            })
            .unwrap_or(false);
        if dragging {
            ev.prevent_default();
        }
    }

    fn release(&self) {
        let dropped = self
            .inner
            .try_update_value(|inner| match inner.gesture.release() {
                ReleaseOutcome::Ignored | ReleaseOutcome::Tap { .. } => {
                    inner.press = None;
                    None
                }
                ReleaseOutcome::Dropped { .. } => {
                    let active = inner.active.take()?;
                    let (list_key, session) = active.tear_down();
                    Some((list_key, session.finish(), inner.on_drop.clone()))
                }
            })
            .flatten();

        self.dragging.set(None);
        if let Some((list_key, dropped, on_drop)) = dropped {
            web_sys::console::log_1(
                &format!("[DND] drop in {}: {} -> {}", list_key, dropped.source, dropped.target).into(),
            );
            on_drop(list_key, dropped);
        }
    }
}

fn row_of(ev: &PointerEvent) -> Option<HtmlElement> {
    let handle = ev.current_target()?.dyn_into::<Element>().ok()?;
    handle
        .closest(&format!(".{}", ROW_CLASS))
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Hide the row, reserve its slot, float a copy over it.
fn begin_drag(press: Press) -> Option<ActiveDrag> {
    let document = web_sys::window()?.document()?;
    let list = press.row.parent_element()?;
    let rect = press.row.get_bounding_client_rect();

    let proxy = press.row.clone_node_with_deep(true).ok()?.dyn_into::<HtmlElement>().ok()?;
    let _ = proxy.class_list().add_1(PROXY_CLASS);
    let style = proxy.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("left", &format!("{}px", rect.left()));
    let _ = style.set_property("top", &format!("{}px", rect.top()));
    let _ = style.set_property("width", &format!("{}px", rect.width()));
    let _ = style.set_property("pointer-events", "none");
    let _ = style.set_property("z-index", "1000");
    document.body()?.append_child(&proxy).ok()?;

    let placeholder = document.create_element("div").ok()?.dyn_into::<HtmlElement>().ok()?;
    placeholder.set_class_name(PLACEHOLDER_CLASS);
    let _ = placeholder.style().set_property("height", &format!("{}px", rect.height()));
    let row_node: &Node = press.row.as_ref();
    if list.insert_before(&placeholder, Some(row_node)).is_err() {
        proxy.remove();
        return None;
    }
    let _ = press.row.style().set_property("display", "none");

    let session = DragSession::begin(press.index, RowBox::new(rect.top(), rect.height()), press.last_y);
    web_sys::console::log_1(&format!("[DND] drag start in {} at {}", press.list_key, press.index).into());

    Some(ActiveDrag {
        list_key: press.list_key,
        session,
        row: press.row,
        list,
        proxy,
        placeholder,
    })
}

fn follow_pointer(active: &mut ActiveDrag, y: f64) {
    let others = sibling_rows(&active.list, &active.row);
    let boxes: Vec<RowBox> = others
        .iter()
        .map(|el| {
            let rect = el.get_bounding_client_rect();
            RowBox::new(rect.top(), rect.height())
        })
        .collect();

    let slot = active.session.pointer_moved(y, &boxes);
    let _ = active
        .proxy
        .style()
        .set_property("top", &format!("{}px", active.session.proxy_top()));

    let moved = match others.get(slot) {
        Some(before) => {
            let before: &Node = before.as_ref();
            active.list.insert_before(&active.placeholder, Some(before))
        }
        None => active.list.append_child(&active.placeholder),
    };
    if moved.is_err() {
        web_sys::console::error_1(&"[DND] failed to move placeholder".into());
    }
}

/// Rows of `list` in document order, without the dragged row and the placeholder.
fn sibling_rows(list: &Element, dragged: &HtmlElement) -> Vec<Element> {
    let children = list.children();
    let dragged: &Element = dragged.as_ref();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .filter(|el| el != dragged && el.class_list().contains(ROW_CLASS))
        .collect()
}
