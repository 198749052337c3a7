use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;
use yew::prelude::*;

/// Namespaced LocalStorage key of a persisted type.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

/// Load/save helpers for types persisted under a [`StorageKey`]. A failed
/// save is logged and otherwise ignored; the game keeps running in-memory.
pub(crate) trait LocalStored: StorageKey + Sized {
    fn local_get() -> Option<Self>;
    fn local_save(&self);

    fn local_or_default() -> Self
    where
        Self: Default,
    {
        Self::local_get().unwrap_or_default()
    }
}

impl<T: StorageKey + Serialize + DeserializeOwned> LocalStored for T {
    fn local_get() -> Option<Self> {
        LocalStorage::get(Self::KEY).ok()
    }

    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(Self::KEY, self) {
            log::error!("Could not save {} to local storage: {:?}", Self::KEY, err);
        }
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attach the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Three-digit counter display, clamped like the classic handheld counters.
pub(crate) fn format_for_counter(num: u32) -> String {
    match num {
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}
