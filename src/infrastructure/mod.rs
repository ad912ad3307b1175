pub mod chromium_observer;
pub mod page_observer;

pub use chromium_observer::{ChromiumFactory, ChromiumObserver};
pub use page_observer::{ObservedElement, ObserverFactory, PageObserver};
