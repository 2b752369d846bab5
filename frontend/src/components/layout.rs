use crate::components::header::Header;
use crate::components::sidebar::Sidebar;
use crate::router::Route;
use gloo_events::EventListener;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SidebarState {
    pub collapsed: bool,
}

/// Viewports narrower than this get the sidebar as an overlay.
pub const NARROW_VIEWPORT_PX: f64 = 640.0;

pub fn is_narrow(width: f64) -> bool {
    width < NARROW_VIEWPORT_PX
}

fn viewport_is_narrow() -> bool {
    web_sys::window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|width| width.as_f64())
        .map_or(false, is_narrow)
}

impl SidebarState {
    /// Small screens start with the overlay closed.
    pub fn for_viewport(narrow: bool) -> Self {
        Self { collapsed: narrow }
    }
}

pub enum SidebarAction {
    Toggle,
    Collapse,
}

impl Reducible for SidebarState {
    type Action = SidebarAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let collapsed = match action {
            SidebarAction::Toggle => !self.collapsed,
            SidebarAction::Collapse => true,
        };
        Rc::new(Self { collapsed })
    }
}

pub type SidebarContext = UseReducerHandle<SidebarState>;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Html,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let narrow = use_state_eq(viewport_is_narrow);
    let sidebar = use_reducer(|| SidebarState::for_viewport(viewport_is_narrow()));
    let route = use_route::<Route>();
    let on_watch_page = matches!(route, Some(Route::Watch { .. }));

    {
        let narrow = narrow.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "resize", move |_| narrow.set(viewport_is_narrow()))
            });
            move || drop(listener)
        });
    }
    {
        let sidebar = sidebar.clone();
        use_effect_with(*narrow, move |narrow| {
            if *narrow {
                sidebar.dispatch(SidebarAction::Collapse);
            }
            || ()
        });
    }

    let collapse = {
        let sidebar = sidebar.clone();
        Callback::from(move |_: MouseEvent| sidebar.dispatch(SidebarAction::Collapse))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    let sidebar_width = if sidebar.collapsed {
        "w-[72px]"
    } else if on_watch_page {
        "w-[240px] md:w-[280px]"
    } else {
        "w-[240px] md:w-[280px] lg:w-[300px] xl:w-[320px]"
    };

    html! {
        <ContextProvider<SidebarContext> context={sidebar.clone()}>
            <div class="h-screen w-screen overflow-hidden bg-[#0f0f0f] text-white">
                <div class="h-[8vh] w-full sm:h-[6vh]">
                    <Header />
                </div>
                <div class="relative flex h-[92vh] sm:h-[94vh]">
                    if *narrow {
                        if !sidebar.collapsed {
                            <div class="fixed inset-0 z-50 bg-black/50" onclick={collapse}>
                                <div class="h-full w-[280px] border-r border-[#323232] bg-[#0f0f0f]" onclick={keep_open}>
                                    <Sidebar />
                                </div>
                            </div>
                        }
                    } else {
                        <div class={classes!("overflow-hidden", "border-r", "border-[#323232]",
                                             "transition-all", "duration-300", sidebar_width)}>
                            <Sidebar />
                        </div>
                    }
                    <main class="flex-1 overflow-hidden">
                        { props.children.clone() }
                    </main>
                </div>
            </div>
        </ContextProvider<SidebarContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_viewport_starts_collapsed() {
        assert!(is_narrow(375.0));
        assert!(!is_narrow(NARROW_VIEWPORT_PX));
        assert!(SidebarState::for_viewport(true).collapsed);
        assert!(!SidebarState::for_viewport(false).collapsed);
    }

    #[test]
    fn toggle_and_collapse() {
        let open = Rc::new(SidebarState::for_viewport(false));
        let closed = open.reduce(SidebarAction::Toggle);
        assert!(closed.collapsed);
        assert!(closed.clone().reduce(SidebarAction::Collapse).collapsed);
        assert!(!closed.reduce(SidebarAction::Toggle).collapsed);
    }
}
