#![cfg(target_arch = "wasm32")]

//! Hộp thoại thêm/sửa sự kiện và hộp thoại xác nhận.

use chrono::NaiveDate;
use timeline_core::palette::{compose_date, days_in_month, selectable_years, split_date};
use timeline_core::{current_year, EventDraft, LifeEvent, PRESET_COLORS};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew::TargetCast;

#[derive(Properties, PartialEq)]
pub struct EventDialogProps {
    pub draft: EventDraft,
    pub on_save: Callback<LifeEvent>,
    pub on_close: Callback<()>,
}

#[function_component(EventDialog)]
pub fn event_dialog(props: &EventDialogProps) -> Html {
    let form = use_state(|| props.draft.clone());
    let error = use_state(|| None::<String>);
    let is_edit = props.draft.is_edit();

    let on_title = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            edit_form(&form, |d| d.title = value);
        })
    };
    let on_date = {
        let form = form.clone();
        Callback::from(move |date: NaiveDate| edit_form(&form, |d| d.date = date))
    };
    let on_color = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            edit_form(&form, |d| d.color = Some(value));
        })
    };
    let on_preset = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            if !value.is_empty() {
                edit_form(&form, |d| d.color = Some(value));
            }
        })
    };
    let on_significance = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            if let Ok(level) = value.parse::<u8>() {
                edit_form(&form, |d| d.significance = level);
            }
        })
    };
    let on_description = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            edit_form(&form, |d| d.description = value);
        })
    };

    let on_submit = {
        let form = form.clone();
        let error = error.clone();
        let on_save = props.on_save.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match (*form).clone().validate() {
                Ok(event) => {
                    error.set(None);
                    on_save.emit(event);
                    on_close.emit(());
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        })
    };
    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let color = form.color.clone().unwrap_or_default();

    html! {
        <div class="lt-overlay" role="dialog" aria-modal="true">
            <div class="lt-dialog">
                <div class="lt-dialog-accent" style={format!("background-color: {color}")} />
                <header class="lt-dialog-header">
                    <h2>{ if is_edit { "Edit Life Event" } else { "Add Life Event" } }</h2>
                    <p>{"Capture your significant life moments to visualize on your timeline."}</p>
                </header>
                <form class="lt-form" onsubmit={on_submit}>
                    <label class="lt-field">
                        <span>{"Event Title"}</span>
                        <input
                            type="text"
                            placeholder="Graduation, New Job, etc."
                            value={form.title.clone()}
                            oninput={on_title}
                        />
                    </label>
                    <div class="lt-field">
                        <span>{"Date"}</span>
                        <CascadingDateSelector value={form.date} on_change={on_date} />
                    </div>
                    <div class="lt-field">
                        <span>{"Color"}</span>
                        <div class="lt-color-row">
                            <input type="color" value={color.clone()} oninput={on_color.clone()} />
                            <input type="text" value={color} oninput={on_color} />
                        </div>
                        <select class="lt-select" onchange={on_preset}>
                            <option value="" selected=true>{"Use predefined color"}</option>
                            { for PRESET_COLORS.iter().map(|preset| html! {
                                <option value={preset.value}>{ preset.label }</option>
                            }) }
                        </select>
                    </div>
                    <label class="lt-field">
                        <span>{ format!("Significance ({}%)", form.significance) }</span>
                        <input
                            type="range"
                            min="1"
                            max="100"
                            step="1"
                            value={form.significance.to_string()}
                            oninput={on_significance}
                        />
                        <small>{"How significant is this event in your life?"}</small>
                    </label>
                    <label class="lt-field">
                        <span>{"Description (Optional)"}</span>
                        <textarea
                            placeholder="Add details about this life event..."
                            value={form.description.clone()}
                            oninput={on_description}
                        />
                    </label>
                    { (*error).as_ref().map(|msg| html! { <p class="lt-form-error">{ msg.clone() }</p> }).unwrap_or_default() }
                    <footer class="lt-dialog-footer">
                        <button type="button" class="lt-button is-outline" onclick={on_cancel}>{"Cancel"}</button>
                        <button type="submit" class="lt-button">{"Save Event"}</button>
                    </footer>
                </form>
            </div>
        </div>
    }
}

fn edit_form(form: &UseStateHandle<EventDraft>, apply: impl FnOnce(&mut EventDraft)) {
    let mut next = (**form).clone();
    apply(&mut next);
    form.set(next);
}

#[derive(Properties, PartialEq)]
pub struct DateSelectorProps {
    pub value: NaiveDate,
    pub on_change: Callback<NaiveDate>,
}

/// Ba ô chọn năm / tháng / ngày; danh sách ngày theo độ dài tháng.
#[function_component(CascadingDateSelector)]
pub fn cascading_date_selector(props: &DateSelectorProps) -> Html {
    let (year, month, day) = split_date(props.value);

    let select = |part: u8| {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let Ok(value) = e.target_unchecked_into::<HtmlSelectElement>().value().parse::<i32>() else {
                return;
            };
            let next = match part {
                0 => compose_date(value, month, day),
                1 => compose_date(year, value as u32, day),
                _ => compose_date(year, month, value as u32),
            };
            if let Some(date) = next {
                on_change.emit(date);
            }
        })
    };

    html! {
        <div class="lt-date-selector">
            <label>
                <span>{"Year:"}</span>
                <select onchange={select(0)}>
                    { for selectable_years(current_year()).into_iter().map(|y| html! {
                        <option value={y.to_string()} selected={y == year}>{ y }</option>
                    }) }
                </select>
            </label>
            <label>
                <span>{"Month:"}</span>
                <select onchange={select(1)}>
                    { for (1..=12u32).map(|m| html! {
                        <option value={m.to_string()} selected={m == month}>{ m }</option>
                    }) }
                </select>
            </label>
            <label>
                <span>{"Day:"}</span>
                <select onchange={select(2)}>
                    { for (1..=days_in_month(year, month)).map(|d| html! {
                        <option value={d.to_string()} selected={d == day}>{ d }</option>
                    }) }
                </select>
            </label>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub title: AttrValue,
    pub description: AttrValue,
    pub action_label: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let on_confirm = {
        let cb = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_cancel = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <div class="lt-overlay" role="alertdialog" aria-modal="true">
            <div class="lt-dialog is-compact">
                <header class="lt-dialog-header">
                    <h2>{ props.title.clone() }</h2>
                    <p>{ props.description.clone() }</p>
                </header>
                <footer class="lt-dialog-footer">
                    <button type="button" class="lt-button is-outline" onclick={on_cancel}>{"Cancel"}</button>
                    <button type="button" class="lt-button is-destructive" onclick={on_confirm}>{ props.action_label.clone() }</button>
                </footer>
            </div>
        </div>
    }
}
