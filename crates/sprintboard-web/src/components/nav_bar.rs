use sprintboard_core::views::View;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct NavBarProps {
  pub view:        View,
  pub on_select:   Callback<View>,
  pub on_new_task: Callback<()>
}

#[function_component(NavBar)]
pub fn nav_bar(props: &NavBarProps) -> Html {
  let on_new_task = {
    let on_new_task = props.on_new_task.clone();
    Callback::from(move |_| on_new_task.emit(()))
  };

  html! {
      <nav class="nav-bar">
          <div class="brand">{ "Sprintboard" }</div>
          <div class="nav-items">
              {
                  for View::ALL.into_iter().map(|view| {
                      let on_select = props.on_select.clone();
                      html! {
                          <button
                              class={classes!("nav-item", (props.view == view).then_some("active"))}
                              onclick={Callback::from(move |_| on_select.emit(view))}
                          >
                              { view.label() }
                          </button>
                      }
                  })
              }
          </div>
          <button class="primary" onclick={on_new_task}>{ "New Task" }</button>
      </nav>
  }
}
