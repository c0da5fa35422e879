/// Functional areas of the recorder's JSON API
///
/// The device serves each area on its own port, and the first segment of a
/// request path names the area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Device and tuner status, channel lists and current programs
    Status,

    /// Electronic program guide
    ChannelEpg,

    /// Scheduled recordings
    Schedule,

    /// Completed recordings
    Recorded,
}

/// Port assignment for the API's functional areas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevicePorts {
    /// Port serving `status` and `chEpg` paths
    /// Default: 64210
    pub status: u16,

    /// Port serving `schedule` and `recorded` paths
    /// Default: 64220
    pub schedule: u16,
}

impl Default for DevicePorts {
    fn default() -> Self {
        Self {
            status: 64210,
            schedule: 64220,
        }
    }
}

impl DevicePorts {
    /// Port for a request path, falling back to the status port
    pub fn port_for_path(&self, path: &str) -> u16 {
        Service::from_path(path)
            .map(|service| service.port(self))
            .unwrap_or(self.status)
    }
}

impl Service {
    /// Path prefix used by this area
    pub fn prefix(&self) -> &'static str {
        match self {
            Service::Status => "status",
            Service::ChannelEpg => "chEpg",
            Service::Schedule => "schedule",
            Service::Recorded => "recorded",
        }
    }

    /// Identify the area from the first segment of a request path
    pub fn from_path(path: &str) -> Option<Service> {
        let segment = path.trim_start_matches('/').split('/').next()?;
        match segment {
            "status" => Some(Service::Status),
            "chEpg" => Some(Service::ChannelEpg),
            "schedule" => Some(Service::Schedule),
            "recorded" => Some(Service::Recorded),
            _ => None,
        }
    }

    /// Port this area is served on
    pub fn port(&self, ports: &DevicePorts) -> u16 {
        match self {
            Service::Status | Service::ChannelEpg => ports.status,
            Service::Schedule | Service::Recorded => ports.schedule,
        }
    }
}

/// The device a client talks to: host plus its port mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEndpoint {
    host: String,
    ports: DevicePorts,
}

impl DeviceEndpoint {
    /// Endpoint on the default ports
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_ports(host, DevicePorts::default())
    }

    pub fn with_ports(host: impl Into<String>, ports: DevicePorts) -> Self {
        Self {
            host: host.into(),
            ports,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn ports(&self) -> &DevicePorts {
        &self.ports
    }

    /// Port a request path is sent to
    pub fn port_for_path(&self, path: &str) -> u16 {
        self.ports.port_for_path(path)
    }

    /// Base URL of a functional area, e.g. "http://192.168.1.20:64220"
    pub fn base_url(&self, service: Service) -> String {
        format!("http://{}:{}", self.host, service.port(&self.ports))
    }
}
