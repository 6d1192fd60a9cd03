use clap::Parser;

/// Updates the DynHost configured on your domain registered on OVH with the
/// current public IP of this machine.
///
/// Credentials left off the command line are read from the JSON configuration
/// file instead. The process exits with 0 if the IP was updated, 75 if the
/// provider reports the IP is unchanged, and 1 on any error.
#[derive(Parser, Debug, Default)]
#[clap(author, version, about, long_about = None, name = "ovh-dynhost")]
pub struct Opts {
    /// The DynHost hostname to update, e.g. home.mydomain.com.
    pub hostname: Option<String>,
    /// The DynHost username.
    pub username: Option<String>,
    /// The DynHost password.
    pub password: Option<String>,
    /// Override the automatically detected public IP with this one.
    #[clap(long, value_name = "ip")]
    pub ip: Option<String>,
    /// The URL of an API that returns the public IP as a plain text response.
    #[clap(long, value_name = "url")]
    pub pub_ip_source: Option<String>,
    /// Also write logs into this file, in addition to the console.
    #[clap(long, value_name = "path")]
    pub log_file: Option<String>,
    /// The path to the JSON configuration file.
    ///
    /// Defaults to `.ovh-dynhost.conf` in your home directory.
    #[clap(long, value_name = "path")]
    pub conf_file: Option<String>,
    /// Enable debug verbosity for logging.
    #[clap(action, long, short)]
    pub debug: bool,
}
