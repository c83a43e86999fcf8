//! Giao diện timeline sự kiện đời sống cho môi trường WebAssembly.

pub mod toast;

#[cfg(target_arch = "wasm32")]
mod dialog;
#[cfg(target_arch = "wasm32")]
mod export;
#[cfg(target_arch = "wasm32")]
mod local_storage;
#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::rc::Rc;

    use crate::dialog::{ConfirmDialog, EventDialog};
    use crate::export;
    use crate::local_storage::LocalStorage;
    use crate::styles;
    use crate::toast::{Toast, ToastList, TOAST_DURATION_MS};
    use timeline_core::{
        current_year, drag_scroll, today, ConfigPatch, EventDraft, LifeEvent, SaveOutcome,
        TickerLayout, TimelineConfig, TimelineError, TimelineStore, YearMarkerLayout, YearRange,
    };
    use timeline_render::export_file_name;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{console, Document, Element, HtmlElement, HtmlInputElement, Window};
    use yew::prelude::*;
    use yew::TargetCast;

    type Store = TimelineStore<LocalStorage>;

    pub enum ToastAction {
        Push(Toast),
        Dismiss(u32),
    }

    impl Reducible for ToastList {
        type Action = ToastAction;

        fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
            let mut next = (*self).clone();
            match action {
                ToastAction::Push(toast) => next.push(toast),
                ToastAction::Dismiss(id) => next.dismiss(id),
            }
            Rc::new(next)
        }
    }

    #[derive(Clone, PartialEq)]
    struct ContextMenuState {
        event_id: String,
        x: i32,
        y: i32,
    }

    #[derive(Clone, Copy)]
    struct DragState {
        start_x: f64,
        start_scroll: f64,
    }

    /// Nội dung một toast: (tiêu đề, mô tả, có phải cảnh báo).
    type Notice = (String, String, bool);

    #[function_component(LifeTimeline)]
    fn life_timeline() -> Html {
        use_effect_with((), |_| {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                if let Err(err) = styles::ensure_styles(&document) {
                    console::error_1(&err);
                }
            }
            || ()
        });

        let year = current_year();
        let store = use_state(|| Store::load(LocalStorage, year));
        let dialog = use_state(|| None::<EventDraft>);
        let pending_delete = use_state(|| None::<String>);
        let clear_open = use_state(|| false);
        let settings_open = use_state(|| false);
        let hovered = use_state(|| None::<String>);
        let menu = use_state(|| None::<ContextMenuState>);
        let dragging = use_state(|| false);
        let drag = use_mut_ref(|| None::<DragState>);
        let toasts = use_reducer(ToastList::default);
        let toast_seq = use_mut_ref(|| 0u32);
        let scroll_ref = use_node_ref();

        let notify = {
            let dispatcher = toasts.dispatcher();
            Callback::from(move |(title, description, destructive): Notice| {
                let id = {
                    let mut seq = toast_seq.borrow_mut();
                    *seq += 1;
                    *seq
                };
                dispatcher.dispatch(ToastAction::Push(Toast {
                    id,
                    title,
                    description,
                    destructive,
                }));
                schedule_dismiss(dispatcher.clone(), id);
            })
        };

        let layout = store.layout(year);
        let range = store.year_range(year);

        let on_add = {
            let dialog = dialog.clone();
            Callback::from(move |_: MouseEvent| dialog.set(Some(EventDraft::blank(today()))))
        };

        let on_edit = {
            let dialog = dialog.clone();
            let store = store.clone();
            Callback::from(move |id: String| {
                if let Some(event) = store.event(&id) {
                    dialog.set(Some(EventDraft::from_event(event)));
                }
            })
        };

        let on_request_delete = {
            let pending_delete = pending_delete.clone();
            Callback::from(move |id: String| pending_delete.set(Some(id)))
        };

        let on_save = {
            let store = store.clone();
            let notify = notify.clone();
            Callback::from(move |event: LifeEvent| {
                let title = event.title.clone();
                match mutate_store(&store, |s| s.save_event(event, current_year())) {
                    Ok(SaveOutcome::Added) => notify.emit((
                        "Event Added".into(),
                        format!("\"{title}\" has been added to your timeline."),
                        false,
                    )),
                    Ok(SaveOutcome::Updated) => notify.emit((
                        "Event Updated".into(),
                        format!("\"{title}\" has been updated."),
                        false,
                    )),
                    Err(err) => report_error(&notify, "Could not save event", &err),
                }
            })
        };

        let on_confirm_delete = {
            let store = store.clone();
            let pending_delete = pending_delete.clone();
            let notify = notify.clone();
            Callback::from(move |_: ()| {
                if let Some(id) = (*pending_delete).clone() {
                    match mutate_store(&store, |s| s.delete_event(&id)) {
                        Ok(removed) => notify.emit((
                            "Event Deleted".into(),
                            format!("\"{}\" has been removed from your timeline.", removed.title),
                            true,
                        )),
                        Err(err) => report_error(&notify, "Could not delete event", &err),
                    }
                }
                pending_delete.set(None);
            })
        };

        let on_confirm_clear = {
            let store = store.clone();
            let clear_open = clear_open.clone();
            let notify = notify.clone();
            Callback::from(move |_: ()| {
                match mutate_store(&store, |s| s.clear_all(current_year())) {
                    Ok(()) => notify.emit((
                        "All Data Cleared".into(),
                        "Your timeline has been reset.".into(),
                        true,
                    )),
                    Err(err) => report_error(&notify, "Could not clear data", &err),
                }
                clear_open.set(false);
            })
        };

        let on_config = {
            let store = store.clone();
            let notify = notify.clone();
            Callback::from(move |patch: ConfigPatch| {
                let result = mutate_store(&store, |s| s.update_config(&patch, current_year()));
                if let Err(err) = result {
                    report_error(&notify, "Could not save settings", &err);
                }
            })
        };

        let on_export = {
            let layout = layout.clone();
            let notify = notify.clone();
            Callback::from(move |_: MouseEvent| {
                notify.emit((
                    "Preparing image...".into(),
                    "Please wait while we generate your timeline image.".into(),
                    false,
                ));
                let on_done = {
                    let notify = notify.clone();
                    Callback::from(move |result: Result<(), String>| match result {
                        Ok(()) => notify.emit((
                            "Export successful!".into(),
                            "Your timeline has been saved as a PNG image.".into(),
                            false,
                        )),
                        Err(err) => {
                            console::error_1(&JsValue::from_str(&format!(
                                "Error exporting timeline: {err}"
                            )));
                            notify.emit((
                                "Export failed".into(),
                                "There was an error creating your image. Please try again."
                                    .into(),
                                true,
                            ));
                        }
                    })
                };
                if let Err(err) = export::export_png(&layout, export_file_name(today()), on_done) {
                    console::error_1(&err);
                }
            })
        };

        let on_mouse_down = {
            let drag = drag.clone();
            let dragging = dragging.clone();
            let scroll_ref = scroll_ref.clone();
            Callback::from(move |e: MouseEvent| {
                if e.button() != 0 {
                    return;
                }
                if let Some(el) = scroll_ref.cast::<HtmlElement>() {
                    *drag.borrow_mut() = Some(DragState {
                        start_x: f64::from(e.client_x()),
                        start_scroll: f64::from(el.scroll_left()),
                    });
                    dragging.set(true);
                }
            })
        };

        let on_mouse_move = {
            let drag = drag.clone();
            let scroll_ref = scroll_ref.clone();
            Callback::from(move |e: MouseEvent| {
                let Some(state) = *drag.borrow() else {
                    return;
                };
                if let Some(el) = scroll_ref.cast::<HtmlElement>() {
                    let max_scroll = f64::from(el.scroll_width() - el.client_width());
                    let next = drag_scroll(
                        state.start_scroll,
                        state.start_x,
                        f64::from(e.client_x()),
                        max_scroll,
                    );
                    el.set_scroll_left(next as i32);
                }
            })
        };

        let on_mouse_up = {
            let drag = drag.clone();
            let dragging = dragging.clone();
            Callback::from(move |_: MouseEvent| {
                *drag.borrow_mut() = None;
                dragging.set(false);
            })
        };

        let close_menu = {
            let menu = menu.clone();
            Callback::from(move |_: MouseEvent| {
                if menu.is_some() {
                    menu.set(None);
                }
            })
        };

        let highlighted = (*hovered).clone();
        let ticker_nodes = layout
            .draw_order(highlighted.as_deref())
            .into_iter()
            .map(|ticker| render_ticker(ticker, highlighted.as_deref(), &hovered, &menu))
            .collect::<Html>();

        html! {
            <div class="lt-root" onclick={close_menu}>
                { render_controls(
                    store.config(),
                    range,
                    *settings_open,
                    on_add,
                    on_export,
                    {
                        let clear_open = clear_open.clone();
                        Callback::from(move |_: MouseEvent| clear_open.set(true))
                    },
                    {
                        let settings_open = settings_open.clone();
                        Callback::from(move |_: MouseEvent| settings_open.set(!*settings_open))
                    },
                    on_config,
                ) }

                <div
                    ref={scroll_ref}
                    class={classes!("lt-scroll", dragging.then_some("is-dragging"))}
                    onmousedown={on_mouse_down}
                    onmousemove={on_mouse_move}
                    onmouseup={on_mouse_up.clone()}
                    onmouseleave={on_mouse_up}
                >
                    <div
                        class="lt-surface"
                        style={format!("width: {}px; height: {}px;", layout.width, layout.height)}
                    >
                        <div class="lt-axis" style={format!("top: {}px;", layout.axis_y - 1.0)} />
                        { for layout.years.iter().map(render_year_marker) }
                        { ticker_nodes }
                    </div>
                </div>
                <span class="lt-tip"><strong>{"Tip:"}</strong>{" Right-click on the event line to edit or delete it."}</span>

                { render_event_cards(store.events(), &hovered) }

                { (*menu).clone().map(|state| render_context_menu(state, on_edit, on_request_delete)).unwrap_or_default() }

                {
                    if let Some(draft) = (*dialog).clone() {
                        let dialog = dialog.clone();
                        html! {
                            <EventDialog
                                draft={draft}
                                on_save={on_save}
                                on_close={Callback::from(move |_: ()| dialog.set(None))}
                            />
                        }
                    } else {
                        Html::default()
                    }
                }

                {
                    if pending_delete.is_some() {
                        let pending_delete = pending_delete.clone();
                        html! {
                            <ConfirmDialog
                                title="Are you sure?"
                                description="This will permanently delete this life event from your timeline."
                                action_label="Delete"
                                on_confirm={on_confirm_delete}
                                on_cancel={Callback::from(move |_: ()| pending_delete.set(None))}
                            />
                        }
                    } else {
                        Html::default()
                    }
                }

                {
                    if *clear_open {
                        let clear_open = clear_open.clone();
                        html! {
                            <ConfirmDialog
                                title="Clear All Data?"
                                description="This will delete all events and reset your timeline settings. This action cannot be undone."
                                action_label="Clear All"
                                on_confirm={on_confirm_clear}
                                on_cancel={Callback::from(move |_: ()| clear_open.set(false))}
                            />
                        }
                    } else {
                        Html::default()
                    }
                }

                { render_toasts(&toasts) }
            </div>
        }
    }

    /// Áp dụng thay đổi lên bản sao của store rồi cập nhật state.
    fn mutate_store<T>(
        store: &UseStateHandle<Store>,
        apply: impl FnOnce(&mut Store) -> Result<T, TimelineError>,
    ) -> Result<T, TimelineError> {
        let mut next = (**store).clone();
        let result = apply(&mut next);
        store.set(next);
        result
    }

    fn report_error(notify: &Callback<Notice>, title: &str, err: &TimelineError) {
        console::error_1(&JsValue::from_str(&format!("{title}: {err}")));
        notify.emit((title.to_string(), err.to_string(), true));
    }

    fn schedule_dismiss(dispatcher: UseReducerDispatcher<ToastList>, id: u32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(move || dispatcher.dispatch(ToastAction::Dismiss(id)));
        if let Err(err) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            TOAST_DURATION_MS,
        ) {
            console::error_1(&err);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_controls(
        config: &TimelineConfig,
        range: YearRange,
        settings_open: bool,
        on_add: Callback<MouseEvent>,
        on_export: Callback<MouseEvent>,
        on_reset: Callback<MouseEvent>,
        on_toggle_settings: Callback<MouseEvent>,
        on_config: Callback<ConfigPatch>,
    ) -> Html {
        let number_input = |parse: fn(&str, YearRange) -> ConfigPatch| {
            let on_config = on_config.clone();
            Callback::from(move |e: Event| {
                let value = e.target_unchecked_into::<HtmlInputElement>().value();
                on_config.emit(parse(value.trim(), range));
            })
        };
        let switch = |build: fn(bool) -> ConfigPatch| {
            let on_config = on_config.clone();
            Callback::from(move |e: Event| {
                let checked = e.target_unchecked_into::<HtmlInputElement>().checked();
                on_config.emit(build(checked));
            })
        };

        let on_start = number_input(|v, range| ConfigPatch {
            start_year: Some(v.parse().unwrap_or(range.earliest_year)),
            ..ConfigPatch::default()
        });
        let on_end = number_input(|v, range| ConfigPatch {
            end_year: Some(v.parse().unwrap_or(range.latest_year)),
            ..ConfigPatch::default()
        });
        let on_spacing = number_input(|v, _| ConfigPatch {
            year_spacing: Some(v.parse().unwrap_or(100)),
            ..ConfigPatch::default()
        });
        let on_future = switch(|checked| ConfigPatch {
            show_future_years: Some(checked),
            ..ConfigPatch::default()
        });
        let on_highlight = switch(|checked| ConfigPatch {
            highlight_current_year: Some(checked),
            ..ConfigPatch::default()
        });

        // Nhấp trong popover không được đóng menu ngữ cảnh của gốc.
        let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

        html! {
            <div class="lt-controls">
                <div class="lt-controls-group">
                    <button type="button" class="lt-button" title="Add a new life event" onclick={on_add}>{"+ Add Life Event"}</button>
                    <button type="button" class="lt-button is-outline" title="Save timeline as PNG image" onclick={on_export}>{"Export as Image"}</button>
                </div>
                <div class="lt-controls-group">
                    <button type="button" class="lt-button is-destructive" title="Clear all data and reset settings" onclick={on_reset}>{"Clear All Data"}</button>
                    <button type="button" class="lt-button is-outline" title="Timeline settings" onclick={on_toggle_settings}>{"Settings"}</button>
                    {
                        if settings_open {
                            html! {
                                <div class="lt-settings" onclick={stop}>
                                    <h4>{"Timeline Settings"}</h4>
                                    <div class="lt-settings-grid">
                                        <label class="lt-field">
                                            <span>{"Start Year"}</span>
                                            <input
                                                type="number"
                                                value={config.start_year.to_string()}
                                                min={(range.earliest_year - 10).to_string()}
                                                onchange={on_start}
                                            />
                                        </label>
                                        <label class="lt-field">
                                            <span>{"End Year"}</span>
                                            <input
                                                type="number"
                                                value={config.end_year.to_string()}
                                                min={range.earliest_year.to_string()}
                                                onchange={on_end}
                                            />
                                        </label>
                                    </div>
                                    <label class="lt-field">
                                        <span>{"Year Spacing (px)"}</span>
                                        <input
                                            type="number"
                                            value={config.year_spacing.to_string()}
                                            min="50"
                                            max="200"
                                            onchange={on_spacing}
                                        />
                                    </label>
                                    <label class="lt-switch">
                                        <span>{"Show Future Years"}</span>
                                        <input type="checkbox" checked={config.show_future_years} onchange={on_future} />
                                    </label>
                                    <label class="lt-switch">
                                        <span>{"Highlight Current Year"}</span>
                                        <input type="checkbox" checked={config.highlight_current_year} onchange={on_highlight} />
                                    </label>
                                </div>
                            }
                        } else {
                            Html::default()
                        }
                    }
                </div>
            </div>
        }
    }

    fn render_year_marker(marker: &YearMarkerLayout) -> Html {
        html! {
            <div
                class={classes!("lt-year", marker.is_current.then_some("is-current"))}
                style={format!("left: {}px; top: {}px; opacity: {};", marker.x, marker.tick_top, marker.opacity)}
            >
                <div class="lt-year-tick" style={format!("height: {}px;", marker.tick_height)} />
                <span class="lt-year-label">{ marker.year }</span>
            </div>
        }
    }

    fn render_ticker(
        ticker: &TickerLayout,
        highlighted: Option<&str>,
        hovered: &UseStateHandle<Option<String>>,
        menu: &UseStateHandle<Option<ContextMenuState>>,
    ) -> Html {
        let is_highlighted = highlighted == Some(ticker.event_id.as_str());
        let on_enter = {
            let hovered = hovered.clone();
            let id = ticker.event_id.clone();
            Callback::from(move |_: MouseEvent| hovered.set(Some(id.clone())))
        };
        let on_leave = {
            let hovered = hovered.clone();
            Callback::from(move |_: MouseEvent| hovered.set(None))
        };
        let on_context = {
            let menu = menu.clone();
            let id = ticker.event_id.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                menu.set(Some(ContextMenuState {
                    event_id: id.clone(),
                    x: e.client_x(),
                    y: e.client_y(),
                }));
            })
        };

        html! {
            <div
                key={ticker.event_id.clone()}
                class={classes!("lt-ticker", is_highlighted.then_some("is-highlighted"))}
                style={format!(
                    "left: {}px; top: {}px; height: {}px; background-color: {};",
                    ticker.x, ticker.top, ticker.height, ticker.color
                )}
                onmouseenter={on_enter}
                onmouseleave={on_leave}
                oncontextmenu={on_context}
            >
                <span class="lt-ticker-title" style={format!("color: {};", ticker.color)}>
                    { ticker.title.clone() }
                </span>
            </div>
        }
    }

    fn render_context_menu(
        state: ContextMenuState,
        on_edit: Callback<String>,
        on_delete: Callback<String>,
    ) -> Html {
        let edit = {
            let id = state.event_id.clone();
            Callback::from(move |_: MouseEvent| on_edit.emit(id.clone()))
        };
        let delete = {
            let id = state.event_id.clone();
            Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
        };

        html! {
            <div class="lt-context-menu" style={format!("left: {}px; top: {}px;", state.x, state.y)}>
                <button type="button" onclick={edit}>{"Edit Event"}</button>
                <button type="button" class="is-destructive" onclick={delete}>{"Delete Event"}</button>
            </div>
        }
    }

    fn render_event_cards(events: &[LifeEvent], hovered: &UseStateHandle<Option<String>>) -> Html {
        html! {
            <section class="lt-events">
                <h3>{"Life Events"}</h3>
                <div class="lt-event-grid">
                    { for events.iter().map(|event| render_event_card(event, hovered)) }
                </div>
            </section>
        }
    }

    fn render_event_card(event: &LifeEvent, hovered: &UseStateHandle<Option<String>>) -> Html {
        let is_highlighted = hovered.as_deref() == Some(event.id.as_str());
        let color = event
            .color
            .clone()
            .unwrap_or_else(|| timeline_core::PRIMARY_COLOR.to_string());
        let on_enter = {
            let hovered = hovered.clone();
            let id = event.id.clone();
            Callback::from(move |_: MouseEvent| hovered.set(Some(id.clone())))
        };
        let on_leave = {
            let hovered = hovered.clone();
            Callback::from(move |_: MouseEvent| hovered.set(None))
        };

        html! {
            <div
                key={event.id.clone()}
                class={classes!("lt-event-card", is_highlighted.then_some("is-highlighted"))}
                onmouseenter={on_enter}
                onmouseleave={on_leave}
            >
                <div class="lt-event-bar" style={format!("background-color: {color};")} />
                <h4>{ event.title.clone() }</h4>
                <p>{ event.date.format("%B %-d, %Y").to_string() }</p>
                {
                    if event.description.is_empty() {
                        Html::default()
                    } else {
                        html! { <p class="lt-event-description">{ event.description.clone() }</p> }
                    }
                }
                <p>{ format!("Significance: {}%", event.significance) }</p>
            </div>
        }
    }

    fn render_toasts(toasts: &UseReducerHandle<ToastList>) -> Html {
        let dispatcher = toasts.dispatcher();
        html! {
            <div class="lt-toasts" aria-live="polite">
                { for toasts.items().iter().map(|toast| {
                    let dispatcher = dispatcher.clone();
                    let id = toast.id;
                    html! {
                        <div
                            key={toast.id}
                            class={classes!("lt-toast", toast.destructive.then_some("is-destructive"))}
                            onclick={Callback::from(move |_: MouseEvent| dispatcher.dispatch(ToastAction::Dismiss(id)))}
                        >
                            <strong>{ toast.title.clone() }</strong>
                            <span>{ toast.description.clone() }</span>
                        </div>
                    }
                }) }
            </div>
        }
    }

    /// Gắn widget timeline vào phần tử khớp `selector`.
    #[wasm_bindgen]
    pub fn mount_life_timeline(selector: &str) -> Result<(), JsValue> {
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Selector lỗi: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("Không tìm thấy element theo selector"))?;

        yew::Renderer::<LifeTimeline>::with_root(target).render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_life_timeline;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_life_timeline(_: &str) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "timeline-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
