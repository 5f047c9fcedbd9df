use yew::{
  Html,
  function_component,
  html
};

#[function_component(LoadingOverlay)]
pub fn loading_overlay() -> Html {
  html! {
      <div class="loading-overlay">
          <div class="spinner"></div>
      </div>
  }
}
