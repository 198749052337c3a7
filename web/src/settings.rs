use crate::theme::Theme;
use crate::utils::*;
use raitsuauto_core as game;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Generator {
    /// Independent per-cell sampling, the classic start.
    Sampled,
    /// Scrambled from a dark board, guaranteed clearable.
    AlwaysSolvable,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub game_config: game::GameConfig,
    pub generator: Generator,
}

impl Settings {
    pub(crate) const PRESETS: &'static [(&'static str, game::GameConfig)] = &[
        ("Classic", game::GameConfig::new_unchecked((5, 5), 0.2)),
        ("Mini", game::GameConfig::new_unchecked((3, 3), 0.35)),
        ("Large", game::GameConfig::new_unchecked((7, 7), 0.2)),
        ("Dense", game::GameConfig::new_unchecked((5, 5), 0.5)),
    ];

    const GENERATORS: &'static [(&'static str, Generator)] = &[
        ("Random", Generator::Sampled),
        ("Always solvable", Generator::AlwaysSolvable),
    ];

    pub(crate) fn start_board(&self) -> game::StartBoard {
        match self.generator {
            Generator::Sampled => game::StartBoard::Sampled,
            Generator::AlwaysSolvable => game::StartBoard::Scrambled,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_config: Settings::PRESETS[0].1,
            generator: Generator::Sampled,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "raitsuauto:settings";
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    #[prop_or_default]
    pub open: bool,
    pub settings: Settings,
    pub callback: Callback<Settings>,
    pub on_close: Callback<MouseEvent>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let settings = props.settings;

    let preset_item = |name: &'static str, config: game::GameConfig| {
        let current = (config == settings.game_config).then_some("current");
        let onclick = {
            let callback = props.callback.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                callback.emit(Settings {
                    game_config: config,
                    ..settings
                });
            })
        };
        html! {
            <li><a href="#" class={classes!(current)} {onclick}>{name}</a></li>
        }
    };

    let generator_item = |name: &'static str, generator: Generator| {
        let current = (generator == settings.generator).then_some("current");
        let onclick = {
            let callback = props.callback.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                callback.emit(Settings {
                    generator,
                    ..settings
                });
            })
        };
        html! {
            <li><a href="#" class={classes!(current)} {onclick}>{name}</a></li>
        }
    };

    let theme_item = |name: &'static str, theme: Theme| {
        let switcher = theme.scheme().unwrap_or("auto");
        let onclick = Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            Theme::apply(theme);
        });
        html! {
            <li><a href="#" data-theme-switcher={switcher} {onclick}>{name}</a></li>
        }
    };

    html! {
        <Modal>
            <dialog id="settings" open={props.open}>
                <article>
                    <h2>{"Settings"}</h2>
                    <h3>{"Board"}</h3>
                    <ul>
                        { for Settings::PRESETS.iter().map(|&(name, config)| preset_item(name, config)) }
                    </ul>
                    <h3>{"Generator"}</h3>
                    <ul>
                        { for Settings::GENERATORS.iter().map(|&(name, generator)| generator_item(name, generator)) }
                    </ul>
                    <h3>{"Theme"}</h3>
                    <ul>
                        { theme_item("Auto", Theme::Auto) }
                        { theme_item("Light", Theme::Light) }
                        { theme_item("Dark", Theme::Dark) }
                    </ul>
                    <footer>
                        <button onclick={props.on_close.clone()}>{"Close"}</button>
                    </footer>
                </article>
            </dialog>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_use_the_first_preset() {
        let settings = Settings::default();

        assert_eq!(settings.game_config, Settings::PRESETS[0].1);
        assert_eq!(settings.start_board(), game::StartBoard::Sampled);
    }

    #[test]
    fn always_solvable_maps_to_the_scrambled_generator() {
        let settings = Settings {
            generator: Generator::AlwaysSolvable,
            ..Settings::default()
        };

        assert_eq!(settings.start_board(), game::StartBoard::Scrambled);
    }

    #[test]
    fn storage_key_is_namespaced() {
        assert_eq!(<Settings as StorageKey>::KEY, "raitsuauto:settings");
    }
}
