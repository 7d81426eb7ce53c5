mod app;
mod components;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{
  Context,
  anyhow
};
use ticklist_core::config::{
  Config,
  LogLevel
};
use ticklist_core::{
  Controller,
  TaskStore
};
use wasm_tracing::WasmLayerConfig;

use crate::app::{
  App,
  AppProps,
  BrowserStorage
};

const CONFIG_TOML: &str =
  include_str!("../assets/ticklist.toml");

fn init_tracing(level: LogLevel) {
  let mut config = WasmLayerConfig::new();
  config.set_max_level(level.to_tracing());
  if let Err(error) =
    wasm_tracing::set_as_global_default_with_config(
      config
    )
  {
    web_sys::console::warn_1(
      &format!(
        "tracing subscriber not \
         installed: {error}"
      )
      .into()
    );
  }
}

fn run(config: Config) -> anyhow::Result<()> {
  let storage = BrowserStorage::detect(
    config.storage.backend
  )
  .context(
    "failed to select browser storage"
  )?;
  tracing::info!(
    kind = ?storage.kind(),
    "selected task storage"
  );

  let store = TaskStore::initialize(storage)
    .context(
      "failed to initialize task store"
    )?;
  let mut controller =
    Controller::new(store);
  controller
    .load_from_storage()
    .context(
      "failed to load tasks from storage"
    )?;

  let mount = web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| {
      document.get_element_by_id("app")
    })
    .ok_or_else(|| {
      anyhow!("missing #app mount element")
    })?;

  yew::Renderer::<App>::with_root_and_props(
    mount,
    AppProps {
      controller: Rc::new(RefCell::new(
        controller
      ))
    }
  )
  .render();
  Ok(())
}

fn main() {
  console_error_panic_hook::set_once();

  let parsed =
    Config::from_toml_str(CONFIG_TOML);
  init_tracing(
    parsed
      .as_ref()
      .map(|cfg| cfg.log.level)
      .unwrap_or_default()
  );
  let config = match parsed {
    | Ok(config) => config,
    | Err(error) => {
      tracing::warn!(
        error = %format!("{error:#}"),
        "using default configuration"
      );
      Config::default()
    }
  };

  tracing::info!(
    storage = ?config.storage.backend,
    "starting ticklist frontend"
  );

  if let Err(error) = run(config) {
    tracing::error!(
      error = %format!("{error:#}"),
      "ticklist failed to start"
    );
    wasm_bindgen::throw_str(&format!(
      "{error:#}"
    ));
  }
}
