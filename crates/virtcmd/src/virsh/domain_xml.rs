//! Minimal view of a libvirt domain definition.
//!
//! Only the `<devices>/<filesystem>` entries matter here: an LXC domain
//! maps its root filesystem with `<target dir='/'/>`, and the matching
//! `<source dir='...'/>` is where that tree lives on the host.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Domain {
    devices: Option<Devices>,
}

#[derive(Debug, Deserialize)]
struct Devices {
    #[serde(rename = "filesystem", default)]
    filesystems: Vec<Filesystem>,
}

#[derive(Debug, Deserialize)]
struct Filesystem {
    source: Option<DirRef>,
    target: Option<DirRef>,
}

#[derive(Debug, Deserialize)]
struct DirRef {
    #[serde(rename = "@dir")]
    dir: Option<String>,
}

/// Extract the host directory backing the domain's root filesystem.
///
/// Returns `Ok(None)` when the definition parses but no filesystem
/// device targets `/`.
pub(crate) fn root_dir(xml: &str) -> Result<Option<String>, quick_xml::DeError> {
    let domain: Domain = quick_xml::de::from_str(xml)?;

    let filesystems = domain.devices.map(|d| d.filesystems).unwrap_or_default();

    for fs in filesystems {
        let target = fs.target.and_then(|t| t.dir);
        if target.as_deref() == Some("/") {
            if let Some(dir) = fs.source.and_then(|s| s.dir) {
                return Ok(Some(dir));
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LXC_DOMAIN: &str = r"<domain type='lxc'>
  <name>cont1</name>
  <memory unit='KiB'>524288</memory>
  <os>
    <type arch='x86_64'>exe</type>
    <init>/sbin/init</init>
  </os>
  <devices>
    <emulator>/usr/libexec/libvirt_lxc</emulator>
    <filesystem type='mount' accessmode='passthrough'>
      <source dir='/srv/lxc/cont1/rootfs'/>
      <target dir='/'/>
    </filesystem>
    <interface type='network'>
      <source network='default'/>
    </interface>
    <console type='pty'/>
  </devices>
</domain>";

    #[test]
    fn finds_root_filesystem_source() {
        let root = root_dir(LXC_DOMAIN).unwrap();
        assert_eq!(root.as_deref(), Some("/srv/lxc/cont1/rootfs"));
    }

    #[test]
    fn picks_the_filesystem_mapped_to_slash() {
        let xml = r"<domain type='lxc'>
  <devices>
    <filesystem type='mount'>
      <source dir='/srv/shared'/>
      <target dir='/mnt/shared'/>
    </filesystem>
    <filesystem type='mount'>
      <source dir='/srv/lxc/cont1/rootfs'/>
      <target dir='/'/>
    </filesystem>
  </devices>
</domain>";

        let root = root_dir(xml).unwrap();
        assert_eq!(root.as_deref(), Some("/srv/lxc/cont1/rootfs"));
    }

    #[test]
    fn no_root_mapping_is_none() {
        let xml = r"<domain type='lxc'>
  <devices>
    <filesystem type='mount'>
      <source dir='/srv/shared'/>
      <target dir='/mnt/shared'/>
    </filesystem>
  </devices>
</domain>";

        assert_eq!(root_dir(xml).unwrap(), None);
        assert_eq!(root_dir("<domain type='lxc'/>").unwrap(), None);
    }

    #[test]
    fn malformed_definition_is_an_error() {
        assert!(root_dir("not xml at all <<<").is_err());
    }
}
