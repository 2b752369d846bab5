use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorViewProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub message: Option<AttrValue>,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
    #[prop_or(AttrValue::Static("Try again"))]
    pub retry_label: AttrValue,
    #[prop_or(true)]
    pub show_back: bool,
}

/// Blocking error state with user-initiated recovery only.
#[function_component(ErrorView)]
pub fn error_view(props: &ErrorViewProps) -> Html {
    let navigator = use_navigator();

    let retry_label = props.retry_label.clone();
    let retry = props.on_retry.clone().map(|on_retry| {
        let onclick = Callback::from(move |_: MouseEvent| on_retry.emit(()));
        html! {
            <button type="button" {onclick}
                class="rounded-full border border-red-400 px-4 py-2 text-red-400 hover:bg-red-400/10">
                { retry_label }
            </button>
        }
    });

    let back = match (props.show_back, navigator) {
        (true, Some(navigator)) => {
            let onclick = Callback::from(move |_: MouseEvent| navigator.back());
            Some(html! {
                <button type="button" {onclick}
                    class="rounded-full bg-gray-800 px-4 py-2 text-white hover:bg-gray-700">
                    {"Go back"}
                </button>
            })
        }
        _ => None,
    };

    html! {
        <div class="flex min-h-[50vh] flex-col items-center justify-center gap-4 p-6 text-center">
            <p class="text-lg text-red-400">{ props.title.clone() }</p>
            if let Some(message) = &props.message {
                <p class="max-w-md text-sm text-gray-400">{ message.clone() }</p>
            }
            <div class="flex gap-3">
                { for retry }
                { for back }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct WarningBadgeProps {
    pub missing: Vec<&'static str>,
}

/// Non-blocking hint that some optional data fell back to defaults.
#[function_component(WarningBadge)]
pub fn warning_badge(props: &WarningBadgeProps) -> Html {
    if props.missing.is_empty() {
        return html! {};
    }
    html! {
        <div class="mb-3 inline-flex items-center gap-2 rounded-md bg-yellow-500/10 px-3 py-1 text-xs text-yellow-300"
             title={format!("Missing: {}", props.missing.join(", "))}>
            <span>{"⚠"}</span>
            <span>{ format!("Some details are unavailable ({})", props.missing.join(", ")) }</span>
        </div>
    }
}
