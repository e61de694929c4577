use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: AttrValue,
    pub value: AttrValue,
    #[prop_or_default]
    pub icon: Option<AttrValue>,
    #[prop_or_default]
    pub value_class: Option<AttrValue>,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="stats shadow bg-base-100">
            <div class="stat">
                if let Some(icon) = &props.icon {
                    <div class="stat-figure text-primary"><i class={icon.to_string()}></i></div>
                }
                <div class="stat-title">{&props.title}</div>
                <div class={classes!("stat-value", "text-2xl", props.value_class.clone())}>{&props.value}</div>
            </div>
        </div>
    }
}
