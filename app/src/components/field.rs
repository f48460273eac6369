//! Input atoms bound to one field of a [`FormController`].
//!
//! Every atom reads its value from the controller signal and writes edits back
//! through [`FormController::set_field`] or [`FormController::set_files`], so the
//! field's error disappears as soon as the visitor changes it.

use forms::{FieldKind, FieldSpec, FormController, SelectOption};
use leptos::{logging, prelude::*, task::spawn_local};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use crate::files::{SelectionCounter, read_file_list, selection_summary};

const INPUT_CLASS: &str = "py-3 px-4 w-full placeholder-gray-400 text-white transition-shadow focus:ring-2 focus:outline-none bg-[#1e1e1e] focus:ring-[#ffef5c]";

/// HTML `type` of the `<input>` used for single-line kinds.
#[must_use]
pub const fn input_type(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::Phone => "tel",
        FieldKind::Password => "password",
        FieldKind::Number => "number",
        FieldKind::Date => "date",
        FieldKind::Time => "time",
        FieldKind::Checkbox => "checkbox",
        FieldKind::Files { .. } => "file",
        FieldKind::Text | FieldKind::TextArea | FieldKind::Select(_) => "text",
    }
}

/// Renders the label, input and current error of `spec`.
pub fn component(spec: FieldSpec, controller: RwSignal<FormController>) -> impl IntoView {
    let name = spec.name;
    let marker = spec.is_required().then_some(" *");
    let error = move || {
        controller.with(|form| {
            form.errors().get(name).map(|message| {
                view! { <p role="alert" class="text-sm text-red-400">{message.to_owned()}</p> }
            })
        })
    };

    let input = match &spec.kind {
        FieldKind::Checkbox => {
            return view! {
                <div class="flex flex-col gap-2">
                    <label class="flex gap-3 items-center text-gray-300">
                        {checkbox(name, controller)}
                        {spec.label}
                        {marker}
                    </label>
                    {error}
                </div>
            }
            .into_any();
        }
        FieldKind::TextArea => text_area(&spec, controller),
        FieldKind::Select(options) => select(name, *options, controller),
        FieldKind::Files { accept, max_count } => {
            file_input(name, *accept, *max_count, controller)
        }
        _ => text_input(&spec, controller),
    };

    view! {
        <div class="flex flex-col gap-2">
            <label class="flex flex-col gap-2 text-gray-300">
                <span>{spec.label}{marker}</span>
                {input}
            </label>
            {error}
        </div>
    }
    .into_any()
}

fn set_text(controller: RwSignal<FormController>, name: &'static str, value: String) {
    controller.update(|form| {
        if let Err(err) = form.set_field(name, value) {
            logging::error!("Edit of `{name}` ignored: {err}");
        }
    });
}

fn input_element(ev: &leptos::ev::Event) -> Option<HtmlInputElement> {
    ev.target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
}

fn text_input(spec: &FieldSpec, controller: RwSignal<FormController>) -> AnyView {
    let name = spec.name;
    view! {
        <input
            name=name
            type=input_type(&spec.kind)
            placeholder=spec.placeholder
            prop:value=move || controller.with(|form| form.values().text(name).to_owned())
            on:input=move |ev| set_text(controller, name, event_target_value(&ev))
            class=INPUT_CLASS
        />
    }
    .into_any()
}

fn text_area(spec: &FieldSpec, controller: RwSignal<FormController>) -> AnyView {
    let name = spec.name;
    view! {
        <textarea
            name=name
            placeholder=spec.placeholder
            rows="4"
            prop:value=move || controller.with(|form| form.values().text(name).to_owned())
            on:input=move |ev| set_text(controller, name, event_target_value(&ev))
            class=INPUT_CLASS
        />
    }
    .into_any()
}

fn select(
    name: &'static str,
    options: &'static [SelectOption],
    controller: RwSignal<FormController>,
) -> AnyView {
    let options = options
        .iter()
        .map(|option| view! { <option value=option.value>{option.label}</option> })
        .collect_view();

    view! {
        <select
            name=name
            prop:value=move || controller.with(|form| form.values().text(name).to_owned())
            on:change=move |ev| set_text(controller, name, event_target_value(&ev))
            class=INPUT_CLASS
        >
            <option value="">"-- Select --"</option>
            {options}
        </select>
    }
    .into_any()
}

fn checkbox(name: &'static str, controller: RwSignal<FormController>) -> impl IntoView {
    view! {
        <input
            name=name
            type="checkbox"
            prop:checked=move || controller.with(|form| form.values().flag(name))
            on:change=move |ev| {
                let Some(input) = input_element(&ev) else {
                    return;
                };
                let checked = input.checked();
                controller.update(|form| {
                    if let Err(err) = form.set_field(name, checked) {
                        logging::error!("Edit of `{name}` ignored: {err}");
                    }
                });
            }
            class="size-5 accent-[#ffef5c]"
        />
    }
}

fn file_input(
    name: &'static str,
    accept: &'static str,
    max_count: Option<usize>,
    controller: RwSignal<FormController>,
) -> AnyView {
    let selections = StoredValue::new(SelectionCounter::default());

    let on_change = move |ev: leptos::ev::Event| {
        let Some(input) = input_element(&ev) else {
            return;
        };
        let Some(list) = input.files() else {
            return;
        };
        let mut ticket = 0;
        selections.update_value(|counter| ticket = counter.next());

        let Some(admitted) =
            controller.try_update(|form| form.admit_selection(name, list.length() as usize))
        else {
            return;
        };
        match admitted {
            Ok(true) => {}
            Ok(false) => {
                input.set_value("");
                return;
            }
            Err(err) => {
                logging::error!("Selection for `{name}` ignored: {err}");
                return;
            }
        }

        spawn_local(async move {
            match read_file_list(&list).await {
                Ok(files) => {
                    if !selections.with_value(|counter| counter.is_current(ticket)) {
                        return;
                    }
                    controller.try_update(|form| {
                        if let Err(err) = form.set_files(name, files) {
                            logging::error!("Selection for `{name}` ignored: {err}");
                        }
                    });
                }
                Err(err) => logging::error!("{err}"),
            }
        });
    };

    view! {
        <input name=name type="file" multiple=true accept=accept on:change=on_change class=INPUT_CLASS/>
        <small class="text-gray-400">
            {move || selection_summary(
                controller.with(|form| form.values().files(name).len()),
                max_count,
            )}
        </small>
    }
    .into_any()
}
