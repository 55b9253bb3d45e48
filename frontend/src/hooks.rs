use std::{cell::RefCell, rc::Rc};

use drag_admin_shared::{
    moderation::action_allowed, ActionKind, ActionTracker, Completion, ListController, ListQuery,
    Notification, QueryParams, ResourceKind, Tab,
};
use yew::prelude::*;

use crate::api;

/// Mutable side of a list screen. Async tasks write here and then force a
/// re-render; nothing in it is read during render except through clones.
#[derive(Default)]
struct ListState {
    params: Option<QueryParams>,
    query: ListQuery,
    actions: ActionTracker,
    notices: Vec<(u64, Notification)>,
    next_notice: u64,
}

impl ListState {
    fn notify(&mut self, notice: Notification) {
        self.next_notice += 1;
        self.notices.push((self.next_notice, notice));
    }
}

/// Everything a resource list page renders from, plus the callbacks it wires
/// to its controls.
#[derive(Clone, PartialEq)]
pub struct ResourceListHandle {
    /// Resource type this list shows.
    pub kind: ResourceKind,
    /// Tab, filter and page selection.
    pub controller: ListController,
    /// Current fetch state and results.
    pub query: ListQuery,
    /// Moderation actions in flight.
    pub actions: ActionTracker,
    /// Notices to show, keyed by id.
    pub notices: Vec<(u64, Notification)>,
    /// Switch to another tab.
    pub on_tab: Callback<Tab>,
    /// Change the filter value.
    pub on_filter: Callback<String>,
    /// Go to a page.
    pub on_page: Callback<u32>,
    /// Run a moderation action on an item id.
    pub on_action: Callback<(String, ActionKind)>,
    /// Dismiss a notice by id.
    pub on_dismiss: Callback<u64>,
    /// Retry the last failed fetch.
    pub on_retry: Callback<()>,
}

/// Issue a read for whatever parameters are current. Responses that arrive
/// after a newer read started are dropped; once the view has unmounted no
/// read is issued at all.
fn start_fetch(kind: ResourceKind, state: Rc<RefCell<ListState>>, rerender: Rc<dyn Fn()>) {
    let ticket = {
        let mut s = state.borrow_mut();
        if s.query.is_closed() {
            return;
        }
        let Some(params) = s.params.clone() else {
            return;
        };
        s.query.begin(params)
    };
    rerender();

    wasm_bindgen_futures::spawn_local(async move {
        let result = api::fetch_resource_page(kind, ticket.params()).await;
        let applied = {
            let mut s = state.borrow_mut();
            let failure = result.as_ref().err().cloned();
            let completion = s.query.complete(&ticket, result);
            if completion == Completion::Applied {
                if let Some(err) = failure {
                    web_sys::console::error_1(
                        &format!("Failed to load {}: {}", kind.label(), err).into(),
                    );
                    s.notify(Notification::fetch_failed(kind, &err));
                }
            }
            completion == Completion::Applied
        };
        if applied {
            rerender();
        }
    });
}

/// Drive one resource list: tab, filter and page selection, reads keyed by
/// request generation, and per-item moderation actions.
#[hook]
pub fn use_resource_list(kind: ResourceKind) -> ResourceListHandle {
    let controller = use_state_eq(|| ListController::new(kind));
    let state = use_mut_ref(ListState::default);
    let force = use_force_update();
    let rerender: Rc<dyn Fn()> = Rc::new(move || force.force_update());

    {
        let state = state.clone();
        use_effect_with((), move |_| move || state.borrow_mut().query.close());
    }

    {
        let state = state.clone();
        let rerender = rerender.clone();
        use_effect_with((*controller).clone(), move |controller| {
            state.borrow_mut().params = Some(controller.params());
            start_fetch(kind, state.clone(), rerender);
            move || state.borrow_mut().query.cancel()
        });
    }

    let on_tab = {
        let controller = controller.clone();
        Callback::from(move |tab: Tab| {
            let mut next = (*controller).clone();
            next.set_tab(tab);
            controller.set(next);
        })
    };

    let on_filter = {
        let controller = controller.clone();
        Callback::from(move |value: String| {
            let mut next = (*controller).clone();
            next.set_filter(value);
            controller.set(next);
        })
    };

    let on_page = {
        let controller = controller.clone();
        Callback::from(move |page: u32| {
            let mut next = (*controller).clone();
            next.set_page(page);
            controller.set(next);
        })
    };

    let on_retry = {
        let state = state.clone();
        let rerender = rerender.clone();
        Callback::from(move |()| start_fetch(kind, state.clone(), rerender.clone()))
    };

    let on_action = {
        let state = state.clone();
        let rerender = rerender.clone();
        Callback::from(move |(id, action): (String, ActionKind)| {
            {
                let mut guard = state.borrow_mut();
                let s = &mut *guard;
                let loaded = s.query.data().and_then(|page| page.find(&id));
                if loaded.is_some_and(|record| !action_allowed(kind, record, action)) {
                    return;
                }
                if !s.actions.begin(&id, action) {
                    return;
                }
            }
            rerender();

            let state = state.clone();
            let rerender = rerender.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::run_action(kind, &id, action).await;
                {
                    let mut s = state.borrow_mut();
                    s.actions.finish(&id);
                    match &result {
                        Ok(()) => s.notify(Notification::action_succeeded(kind, action)),
                        Err(err) => {
                            web_sys::console::error_1(
                                &format!("{action} {id} failed: {err}").into(),
                            );
                            s.notify(Notification::action_failed(kind, action, &id, err));
                        },
                    }
                }
                if state.borrow().query.is_closed() {
                    return;
                }
                rerender();
                if result.is_ok() {
                    start_fetch(kind, state, rerender);
                }
            });
        })
    };

    let on_dismiss = {
        let state = state.clone();
        let rerender = rerender.clone();
        Callback::from(move |notice_id: u64| {
            state
                .borrow_mut()
                .notices
                .retain(|(id, _)| *id != notice_id);
            rerender();
        })
    };

    let s = state.borrow();
    ResourceListHandle {
        kind,
        controller: (*controller).clone(),
        query: s.query.clone(),
        actions: s.actions.clone(),
        notices: s.notices.clone(),
        on_tab,
        on_filter,
        on_page,
        on_action,
        on_dismiss,
        on_retry,
    }
}
