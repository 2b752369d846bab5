use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SpinnerLoaderProps {
    #[prop_or_default]
    pub text: Option<AttrValue>,
}

#[function_component(SpinnerLoader)]
pub fn spinner_loader(props: &SpinnerLoaderProps) -> Html {
    html! {
        <div class="col-span-full flex flex-col items-center justify-center gap-3 py-8">
            <div class="h-8 w-8 animate-spin rounded-full border-4 border-gray-600 border-t-white"></div>
            if let Some(text) = &props.text {
                <p class="text-sm text-gray-400">{ text.clone() }</p>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CardLoaderProps {
    #[prop_or(10)]
    pub count: usize,
    /// Horizontal thumbnail + text rows, as in side panels.
    #[prop_or_default]
    pub compact: bool,
}

#[function_component(CardLoader)]
pub fn card_loader(props: &CardLoaderProps) -> Html {
    if props.compact {
        return html! {
            <div class="flex flex-col gap-2">
                { for (0..props.count).map(|index| html! {
                    <div key={index} class="flex h-[94px] w-full gap-3 p-2">
                        <div class="h-[94px] w-[168px] shrink-0 animate-pulse rounded-xl bg-gray-800"></div>
                        <div class="flex flex-1 flex-col gap-2 pt-1">
                            <div class="h-3 w-11/12 animate-pulse rounded bg-gray-800"></div>
                            <div class="h-3 w-3/5 animate-pulse rounded bg-gray-800"></div>
                        </div>
                    </div>
                })}
            </div>
        };
    }

    html! {
        <div class="grid grid-cols-1 gap-5 md:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4">
            { for (0..props.count).map(|index| html! {
                <div key={index} class="w-full">
                    <div class="mb-3 aspect-video w-full animate-pulse rounded-xl bg-gray-800"></div>
                    <div class="flex items-start gap-3">
                        <div class="h-8 w-8 shrink-0 animate-pulse rounded-full bg-gray-800"></div>
                        <div class="flex flex-1 flex-col gap-2">
                            <div class="h-3 w-full animate-pulse rounded bg-gray-800"></div>
                            <div class="h-3 w-3/5 animate-pulse rounded bg-gray-800"></div>
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}
