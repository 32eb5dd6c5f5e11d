#[derive(clap::ValueEnum, Clone, Debug, Copy)]
pub enum CargoEnv {
    Development,
    Production,
}

#[derive(clap::Parser)]
pub struct AppConfig {
    // production or development
    #[clap(long, env, value_enum)]
    pub cargo_env: CargoEnv,

    // port that the app will bind to
    #[clap(long, env, default_value = "3000")]
    pub port: u16,

    // port advertised to clients when the app sits behind a mapped port (docker etc.), falls back
    // to the bind port
    #[clap(long, env)]
    pub public_port: Option<u16>,

    // the address clients should use, e.g. https://tv.example.com. wins over everything else when
    // set
    #[clap(long, env)]
    pub site_base: Option<String>,

    // redis url for the persisted admin config
    #[clap(long, env)]
    pub redis_url: String,

    // shared with the frontend that issues the auth cookie, have it be anything secure
    // like 'openssl rand -base64 32'
    #[clap(long, env)]
    pub auth_secret: String,

    // the deployment owner, always has full permissions even if the store is empty
    #[clap(long, env)]
    pub owner_username: String,

    // comma separated list of admins used when the store can't answer, e.g. alice,bob
    #[clap(long, env)]
    pub admin_usernames: Option<String>,

    // this should be either * for allowing everything, or a comma separated list of domains like
    // example.com,something.com
    #[clap(long, env, default_value = "*")]
    pub cors_origin: String,

    // optional sentry integration
    #[clap(long, env)]
    pub sentry_dsn: Option<String>,

    // where the rolling production logs go
    #[clap(long, env, default_value = "logs")]
    pub log_dir: String,

    // timeout for fetching a remote subscription document
    #[clap(long, env, default_value = "30")]
    pub subscription_timeout_secs: u64,

    // timeout for each public ip lookup service, they're tried one after another
    #[clap(long, env, default_value = "3")]
    pub ip_probe_timeout_secs: u64,
}

impl AppConfig {
    /// the port clients should connect to
    pub fn advertised_port(&self) -> u16 {
        self.public_port.unwrap_or(self.port)
    }

    /// static admin list, only consulted when the store has nothing to say
    pub fn admin_usernames(&self) -> Vec<String> {
        self.admin_usernames
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| name.to_string())
            .collect()
    }
}

impl Default for AppConfig {
    // defaults aren't really needed here but it's here as a bad fallback (and for tests)
    fn default() -> Self {
        Self {
            cargo_env: CargoEnv::Development,
            port: 3000,
            public_port: None,
            site_base: None,
            redis_url: "redis://localhost:6379".to_string(),
            auth_secret: "default-auth-secret".to_string(),
            owner_username: "admin".to_string(),
            admin_usernames: None,
            cors_origin: "*".to_string(),
            sentry_dsn: None,
            log_dir: "logs".to_string(),
            subscription_timeout_secs: 30,
            ip_probe_timeout_secs: 3,
        }
    }
}
