use yew::prelude::*;

/// `Small` fits inside an action button; `Medium` stands in for a whole list
/// or record while it loads.
#[derive(Clone, Copy, PartialEq)]
pub enum SpinnerSize {
    Small,
    Medium,
}

impl SpinnerSize {
    fn dimension(self) -> u32 {
        match self {
            SpinnerSize::Small => 16,
            SpinnerSize::Medium => 40,
        }
    }

    fn wrapper(self) -> Classes {
        match self {
            SpinnerSize::Small => classes!("inline-flex", "items-center", "justify-center"),
            SpinnerSize::Medium => classes!("flex", "items-center", "justify-center", "p-6"),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadingSpinnerProps {
    #[prop_or(SpinnerSize::Medium)]
    pub size: SpinnerSize,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &LoadingSpinnerProps) -> Html {
    let spinner_style = format!("--spinner-size:{}px;", props.size.dimension());

    html! {
        <div class={props.size.wrapper()} role="status" aria-live="polite" aria-busy="true">
            <div
                style={spinner_style}
                class={classes!(
                    "w-[var(--spinner-size)]",
                    "h-[var(--spinner-size)]",
                    "rounded-full",
                    "border-[3px]",
                    "border-transparent",
                    "bg-[conic-gradient(var(--primary),transparent)]",
                    "[mask:radial-gradient(farthest-side,transparent_calc(100%-4px),#000_calc(100%-3px))]",
                    "animate-[spin_0.9s_linear_infinite]"
                )}
            />
            <span class={classes!("sr-only")}>{ "Working..." }</span>
        </div>
    }
}
