use sprintboard_core::views::View;

const VIEW_STORAGE_KEY: &str =
  "sprintboard.view";
const API_BASE_URL_STORAGE_KEY: &str =
  "sprintboard.api_base_url";

fn local_storage() -> Option<web_sys::Storage> {
  web_sys::window().and_then(|window| {
    window
      .local_storage()
      .ok()
      .flatten()
  })
}

fn load_item(key: &str) -> Option<String> {
  local_storage().and_then(|storage| {
    storage
      .get_item(key)
      .ok()
      .flatten()
  })
}

pub fn load_view() -> View {
  load_item(VIEW_STORAGE_KEY)
    .as_deref()
    .and_then(View::from_key)
    .unwrap_or_default()
}

pub fn save_view(view: View) {
  if let Some(storage) = local_storage() {
    let _ = storage.set_item(
      VIEW_STORAGE_KEY,
      view.as_key()
    );
  }
}

pub fn load_api_base_url() -> Option<String> {
  load_item(API_BASE_URL_STORAGE_KEY)
    .filter(|url| !url.trim().is_empty())
}
