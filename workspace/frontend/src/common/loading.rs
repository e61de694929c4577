use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or_default]
    pub text: Option<AttrValue>,
    /// Inline spinner for buttons and table cells.
    #[prop_or_default]
    pub small: bool,
}

#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    if props.small {
        return html! { <span class="loading loading-spinner loading-sm"></span> };
    }

    html! {
        <div class="flex flex-col justify-center items-center py-12 gap-4">
            <span class="loading loading-spinner loading-lg"></span>
            if let Some(text) = &props.text {
                <p class="text-sm text-gray-500">{text}</p>
            }
        </div>
    }
}
