pub mod connection;
pub mod headless;

pub use connection::connect_to_browser_and_page;
pub use headless::launch_browser;

use chromiumoxide::handler::Handler;
use futures::StreamExt;
use tokio::task::JoinHandle;

/// 在后台处理浏览器事件
pub(crate) fn spawn_handler(mut handler: Handler) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    })
}
