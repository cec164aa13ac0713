//! Terminal UI: board view with column selection, winning-line highlight and a
//! status line. The machine searches on a worker thread.

mod app;
mod game_view;

pub use app::App;
