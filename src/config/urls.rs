//! Archive download URLs

/// Default blobstore serving runtime and buildpack archives
pub const DEFAULT_BLOBSTORE: &str = "https://cdn.mendix.com";

/// JDK package name on the blobstore (dpkg container)
pub const JDK_ARCHIVE: &str = "oracle-java8u45-jdk_8u45_linux_x64.deb";

/// mono runtime archive name on the blobstore
pub const MONO_ARCHIVE: &str = "mono-3.10.0.tar.gz";

/// URL of the runtime archive for a given runtime version
pub fn runtime(blobstore: &str, version: &semver::Version) -> String {
    format!("{}/runtime/mendix-{version}.tar.gz", blobstore.trim_end_matches('/'))
}

/// URL of the mxbuild archive for a given runtime version
pub fn mxbuild(blobstore: &str, version: &semver::Version) -> String {
    format!("{}/runtime/mxbuild-{version}.tar.gz", blobstore.trim_end_matches('/'))
}

/// URL of the Java SDK package
pub fn jdk(blobstore: &str) -> String {
    format!("{}/mx-buildpack/{JDK_ARCHIVE}", blobstore.trim_end_matches('/'))
}

/// URL of the mono runtime archive
pub fn mono(blobstore: &str) -> String {
    format!("{}/mx-buildpack/{MONO_ARCHIVE}", blobstore.trim_end_matches('/'))
}
