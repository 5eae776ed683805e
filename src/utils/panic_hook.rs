use leptos::logging::log;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::panic;

thread_local! {
    /// Resource pages currently mounted, by label, with a mount count.
    static MOUNTED_PAGES: RefCell<BTreeMap<&'static str, usize>> = const { RefCell::new(BTreeMap::new()) };
}

pub fn page_mounted(label: &'static str) {
    MOUNTED_PAGES.with(|pages| *pages.borrow_mut().entry(label).or_default() += 1);
}

pub fn page_unmounted(label: &'static str) {
    MOUNTED_PAGES.with(|pages| {
        let mut pages = pages.borrow_mut();
        if let Some(count) = pages.get_mut(label) {
            *count -= 1;
            if *count == 0 {
                pages.remove(label);
            }
        }
    });
}

/// Labels of the pages mounted right now.
pub fn mounted_pages() -> Vec<&'static str> {
    MOUNTED_PAGES.with(|pages| pages.borrow().keys().copied().collect())
}

/// Sets up a custom panic hook that provides more context for Leptos owner disposal panics
pub fn set_custom_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        original_hook(panic_info);

        let message = if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else {
            "Unknown panic".to_string()
        };

        if message.contains("OwnerDisposed") {
            log!("[PANIC] Leptos owner disposal detected. A response probably landed after its page was left.");
            // try_with: the registry may already be gone during thread teardown
            let pages = MOUNTED_PAGES
                .try_with(|pages| pages.try_borrow().map(|p| p.keys().copied().collect::<Vec<_>>()).ok())
                .ok()
                .flatten();
            match pages {
                Some(pages) if !pages.is_empty() => log!("[PANIC] Mounted pages: {}", pages.join(", ")),
                Some(_) => log!("[PANIC] No pages mounted"),
                None => log!("[PANIC] Page registry unavailable"),
            }
        }
    }));
}

/// Call in main.rs or app initialization
pub fn init() {
    log!("[PANIC_HOOK] Setting up custom panic hook");
    set_custom_panic_hook();
    log!("[PANIC_HOOK] Custom panic hook set up successfully");
}
