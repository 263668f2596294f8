//! Network rendering.
//!
//! Turns engine output back into text: prefix, net-mask or host-mask
//! notation, optionally quoted and indented, as a delimited list, a YAML
//! sequence or a JSON array.

use crate::models::Network;
use clap::ValueEnum;
use std::error::Error;

/// How the mask part of a network is written.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum MaskStyle {
    /// `10.0.0.0/24`
    #[default]
    Prefix,
    /// `10.0.0.0/255.255.255.0`
    Net,
    /// `10.0.0.0/0.0.0.255`
    Wildcard,
}

/// Shape of the whole output list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Networks joined by the output delimiter.
    #[default]
    Plain,
    /// YAML sequence, one `- ` item per network.
    Yaml,
    /// JSON array of strings.
    Json,
}

/// Per-network rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendering {
    pub mask: MaskStyle,
    /// Wrap every network in double quotes.
    pub quote: bool,
    /// Spaces put in front of every rendered line.
    pub indent: usize,
}

/// Render one network in the given mask style.
///
/// # Examples
/// ```
/// use ip_aggregator::output::{render_network, MaskStyle};
/// let net = "10.0.0.0/24".parse().unwrap();
/// assert_eq!(render_network(&net, MaskStyle::Net), "10.0.0.0/255.255.255.0");
/// assert_eq!(render_network(&net, MaskStyle::Wildcard), "10.0.0.0/0.0.0.255");
/// ```
pub fn render_network(net: &Network, mask: MaskStyle) -> String {
    match mask {
        MaskStyle::Prefix => net.to_string(),
        MaskStyle::Net => format!("{}/{}", net.base(), net.netmask()),
        MaskStyle::Wildcard => format!("{}/{}", net.base(), net.hostmask()),
    }
}

impl Rendering {
    /// Render one network with mask style and quoting, without indentation.
    pub fn network(&self, net: &Network) -> String {
        let text = render_network(net, self.mask);
        if self.quote {
            quote(&text)
        } else {
            text
        }
    }

    /// Join rendered networks with `delimiter`, each indented.
    pub fn list(&self, nets: &[Network], delimiter: &str) -> String {
        let pad = " ".repeat(self.indent);
        nets.iter()
            .map(|net| format!("{pad}{}", self.network(net)))
            .collect::<Vec<String>>()
            .join(delimiter)
    }

    /// YAML block sequence, one item per line.
    pub fn yaml(&self, nets: &[Network]) -> String {
        let pad = " ".repeat(self.indent);
        nets.iter()
            .map(|net| {
                // bare IPv6 text can contain ':' and must be quoted for YAML
                let text = render_network(net, self.mask);
                format!("{pad}- {}", quote(&text))
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// JSON array of rendered networks.
    pub fn json(&self, nets: &[Network]) -> Result<String, Box<dyn Error>> {
        let rendered: Vec<String> = nets.iter().map(|net| render_network(net, self.mask)).collect();
        Ok(serde_json::to_string_pretty(&rendered)?)
    }

    /// Render `nets` in `format`; `delimiter` only applies to plain lists.
    pub fn render(
        &self,
        nets: &[Network],
        format: OutputFormat,
        delimiter: &str,
    ) -> Result<String, Box<dyn Error>> {
        match format {
            OutputFormat::Plain => Ok(self.list(nets, delimiter)),
            OutputFormat::Yaml => Ok(self.yaml(nets)),
            OutputFormat::Json => self.json(nets),
        }
    }
}

/// Wrap `value` in double quotes, doubling any quote inside.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
