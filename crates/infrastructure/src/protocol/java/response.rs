use mcgate_domain::motd::strip_formatting;
use mcgate_domain::{JavaPlayers, JavaServerInfo, JavaVersion, ModInfo, Motd, PlayerSample};
use serde::Deserialize;
use serde_json::Value;

/// Status JSON as sent by modern servers. Every field is optional in
/// practice; proxies and modded servers omit them freely.
#[derive(Debug, Deserialize)]
pub(crate) struct RawStatus {
    #[serde(default)]
    version: Option<RawVersion>,
    #[serde(default)]
    players: Option<RawPlayers>,
    #[serde(default)]
    description: Value,
    #[serde(default)]
    favicon: Option<String>,
    /// Forge 1.7 - 1.12
    #[serde(default)]
    modinfo: Option<RawModInfo>,
    /// Forge 1.13+
    #[serde(default, rename = "forgeData")]
    forge_data: Option<RawForgeData>,
}

#[derive(Debug, Deserialize)]
struct RawVersion {
    #[serde(default)]
    name: String,
    #[serde(default)]
    protocol: i32,
}

#[derive(Debug, Deserialize)]
struct RawPlayers {
    #[serde(default)]
    online: i64,
    #[serde(default)]
    max: i64,
    #[serde(default)]
    sample: Vec<RawSample>,
}

#[derive(Debug, Deserialize)]
struct RawSample {
    #[serde(default)]
    name: String,
    #[serde(default)]
    id: String,
}

#[derive(Debug, Deserialize)]
struct RawModInfo {
    #[serde(default, rename = "modList")]
    mod_list: Vec<RawForgeMod>,
}

#[derive(Debug, Deserialize)]
struct RawForgeData {
    #[serde(default)]
    mods: Vec<RawForgeMod>,
}

#[derive(Debug, Deserialize)]
struct RawForgeMod {
    #[serde(default, alias = "modId")]
    modid: String,
    #[serde(default, alias = "modmarker")]
    version: String,
}

impl RawStatus {
    pub(crate) fn into_info(self, latency_ms: u64) -> JavaServerInfo {
        let version = self.version.map(|v| JavaVersion {
            name_clean: strip_formatting(&v.name),
            name: v.name,
            protocol: v.protocol,
        });

        let players = self
            .players
            .map(|p| JavaPlayers {
                online: p.online,
                max: p.max,
                sample: p
                    .sample
                    .into_iter()
                    .map(|s| PlayerSample {
                        name: s.name,
                        id: s.id,
                    })
                    .collect(),
            })
            .unwrap_or_default();

        let mods = self
            .forge_data
            .map(|f| f.mods)
            .or_else(|| self.modinfo.map(|m| m.mod_list))
            .unwrap_or_default()
            .into_iter()
            .map(|m| ModInfo {
                name: m.modid,
                version: m.version,
            })
            .collect();

        JavaServerInfo {
            version,
            players,
            motd: Motd::from_component(self.description),
            icon: self.favicon.filter(|icon| !icon.is_empty()),
            latency_ms,
            mods,
            legacy: false,
            query: None,
        }
    }
}
