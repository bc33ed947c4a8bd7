use std::collections::BTreeSet;
use std::fmt;

/// Add-on modules the hub can install alongside an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Module {
    Android,
    AndroidOpenJdk,
    AndroidSdkNdkTools,
    Ios,
    TvOs,
    LinuxMono,
    LinuxIl2cpp,
    MacOsIl2cpp,
    WebGl,
    WindowsMono,
    Lumin,
}

/// Presentation order: mobile, desktop, web, then experimental targets.
const CATALOG: &[Module] = &[
    Module::Android,
    Module::AndroidOpenJdk,
    Module::AndroidSdkNdkTools,
    Module::Ios,
    Module::TvOs,
    Module::LinuxMono,
    Module::LinuxIl2cpp,
    Module::MacOsIl2cpp,
    Module::WebGl,
    Module::WindowsMono,
    Module::Lumin,
];

pub fn available_modules() -> &'static [Module] {
    CATALOG
}

impl Module {
    /// Flag value passed to the hub with `-m`. Case-sensitive.
    pub fn token(self) -> &'static str {
        match self {
            Module::Android => "android",
            Module::AndroidOpenJdk => "android-open-jdk",
            Module::AndroidSdkNdkTools => "android-sdk-ndk-tools",
            Module::Ios => "ios",
            Module::TvOs => "appletv",
            Module::LinuxMono => "linux-mono",
            Module::LinuxIl2cpp => "linux-il2cpp",
            Module::MacOsIl2cpp => "mac-il2cpp",
            Module::WebGl => "webgl",
            Module::WindowsMono => "windows-mono",
            Module::Lumin => "lumin",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Module::Android => "Android Build Support",
            Module::AndroidOpenJdk => "OpenJDK",
            Module::AndroidSdkNdkTools => "Android SDK & NDK Tools",
            Module::Ios => "iOS Build Support",
            Module::TvOs => "tvOS Build Support",
            Module::LinuxMono => "Linux Build Support (Mono)",
            Module::LinuxIl2cpp => "Linux Build Support (IL2CPP)",
            Module::MacOsIl2cpp => "Mac Build Support (IL2CPP)",
            Module::WebGl => "WebGL Build Support",
            Module::WindowsMono => "Windows Build Support (Mono)",
            Module::Lumin => "Lumin OS (Magic Leap) Build Support",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        CATALOG.iter().copied().find(|module| module.token() == token)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Per-module on/off toggles. Everything starts off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSelection {
    enabled: BTreeSet<Module>,
}

impl ModuleSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, module: Module, on: bool) {
        if on {
            self.enabled.insert(module);
        } else {
            self.enabled.remove(&module);
        }
    }

    pub fn is_on(&self, module: Module) -> bool {
        self.enabled.contains(&module)
    }

    /// Enabled modules in catalog order, regardless of toggle order.
    pub fn enabled(&self) -> impl Iterator<Item = Module> + '_ {
        CATALOG
            .iter()
            .copied()
            .filter(move |module| self.is_on(*module))
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

impl FromIterator<Module> for ModuleSelection {
    fn from_iter<I: IntoIterator<Item = Module>>(iter: I) -> Self {
        let mut selection = Self::new();
        for module in iter {
            selection.toggle(module, true);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_order_is_stable() {
        let tokens: Vec<_> = available_modules().iter().map(|m| m.token()).collect();
        assert_eq!(
            tokens,
            vec![
                "android",
                "android-open-jdk",
                "android-sdk-ndk-tools",
                "ios",
                "appletv",
                "linux-mono",
                "linux-il2cpp",
                "mac-il2cpp",
                "webgl",
                "windows-mono",
                "lumin",
            ]
        );
    }

    #[test]
    fn tokens_are_unique() {
        let tokens: HashSet<_> = available_modules().iter().map(|m| m.token()).collect();
        assert_eq!(tokens.len(), available_modules().len());
    }

    #[test]
    fn from_token_is_case_sensitive() {
        assert_eq!(Module::from_token("webgl"), Some(Module::WebGl));
        assert_eq!(Module::from_token("WebGL"), None);
        assert_eq!(Module::from_token("appletv"), Some(Module::TvOs));
    }

    #[test]
    fn selection_toggles_are_independent() {
        let mut selection = ModuleSelection::new();
        assert!(selection.is_empty());

        selection.toggle(Module::Ios, true);
        selection.toggle(Module::Android, true);
        selection.toggle(Module::Ios, false);

        assert!(selection.is_on(Module::Android));
        assert!(!selection.is_on(Module::Ios));
        assert!(!selection.is_on(Module::WebGl));
    }

    #[test]
    fn enabled_follows_catalog_order() {
        let mut selection = ModuleSelection::new();
        selection.toggle(Module::WebGl, true);
        selection.toggle(Module::Android, true);

        let enabled: Vec<_> = selection.enabled().collect();
        assert_eq!(enabled, vec![Module::Android, Module::WebGl]);
    }
}
