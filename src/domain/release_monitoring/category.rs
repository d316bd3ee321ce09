//! MonitoringCategory - the seven fixed monitoring-alert categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a monitoring entry.
///
/// The identifier (`api_health`) names the category in the wizard; the
/// wire key (`api_health_monitoring`) names its array in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitoringCategory {
    ApiHealth,
    Exception,
    Infrastructure,
    Log,
    AwsServices,
    Queue,
    Alb,
}

impl MonitoringCategory {
    /// All categories in document order.
    pub fn all() -> &'static [MonitoringCategory] {
        &[
            MonitoringCategory::ApiHealth,
            MonitoringCategory::Exception,
            MonitoringCategory::Infrastructure,
            MonitoringCategory::Log,
            MonitoringCategory::AwsServices,
            MonitoringCategory::Queue,
            MonitoringCategory::Alb,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            MonitoringCategory::ApiHealth => "api_health",
            MonitoringCategory::Exception => "exception",
            MonitoringCategory::Infrastructure => "infrastructure",
            MonitoringCategory::Log => "log",
            MonitoringCategory::AwsServices => "aws_services",
            MonitoringCategory::Queue => "queue",
            MonitoringCategory::Alb => "alb",
        }
    }

    /// Key of the category array inside `monitoring_categories`.
    pub fn wire_key(&self) -> &'static str {
        match self {
            MonitoringCategory::ApiHealth => "api_health_monitoring",
            MonitoringCategory::Exception => "exception_monitoring",
            MonitoringCategory::Infrastructure => "infrastructure_monitoring",
            MonitoringCategory::Log => "log_monitoring",
            MonitoringCategory::AwsServices => "aws_services_monitoring",
            MonitoringCategory::Queue => "queue_monitoring",
            MonitoringCategory::Alb => "alb_exceptions",
        }
    }

    /// Label used to prefix per-entry error messages.
    pub fn label(&self) -> &'static str {
        match self {
            MonitoringCategory::ApiHealth => "API Health",
            MonitoringCategory::Exception => "Exception",
            MonitoringCategory::Infrastructure => "Infrastructure",
            MonitoringCategory::Log => "Log",
            MonitoringCategory::AwsServices => "AWS Services",
            MonitoringCategory::Queue => "Queue",
            MonitoringCategory::Alb => "ALB Exceptions",
        }
    }

    pub fn from_id(id: &str) -> Option<MonitoringCategory> {
        Self::all().iter().copied().find(|c| c.id() == id)
    }
}

impl fmt::Display for MonitoringCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
