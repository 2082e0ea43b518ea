//! # System Catalog
//!
//! Static description of the deployed record-label agent system: its
//! components, the reference YAML/Dockerfile snippets, the manual verification
//! checklist and the common deployment commands. Nothing here is live; these
//! tables are what the dashboard pages display.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStatus {
    Running,
    Stopped,
    Error,
    Building,
    NotDeployed,
    Pending,
    Unknown,
}

impl ComponentStatus {
    pub fn label(self) -> &'static str {
        match self {
            ComponentStatus::Running => "Running",
            ComponentStatus::Stopped => "Stopped",
            ComponentStatus::Error => "Error",
            ComponentStatus::Building => "Building",
            ComponentStatus::NotDeployed => "Not Deployed",
            ComponentStatus::Pending => "Pending",
            ComponentStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Orchestrator,
    McpServer,
    AgentGroup,
    UiFrontend,
    Agent,
}

impl ComponentKind {
    pub fn label(self) -> &'static str {
        match self {
            ComponentKind::Orchestrator => "Orchestrator",
            ComponentKind::McpServer => "MCP Server",
            ComponentKind::AgentGroup => "Agent Group",
            ComponentKind::UiFrontend => "UI Frontend",
            ComponentKind::Agent => "Agent",
        }
    }
}

#[derive(Debug)]
pub struct AgentDetail {
    pub id: &'static str,
    pub name: &'static str,
    pub status: ComponentStatus,
    pub description: &'static str,
}

#[derive(Debug)]
pub struct SystemComponent {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ComponentKind,
    pub status: ComponentStatus,
    pub description: &'static str,
    pub port: Option<u16>,
    pub path: Option<&'static str>,
    pub dockerfile: Option<&'static str>,
    pub related_files: &'static [&'static str],
    pub agents: &'static [AgentDetail],
    pub config_details: Option<&'static str>,
    pub deployment_details: Option<&'static str>,
}

impl SystemComponent {
    /// Whether the card has anything to show when expanded.
    pub fn has_details(&self) -> bool {
        self.port.is_some()
            || self.path.is_some()
            || self.dockerfile.is_some()
            || !self.related_files.is_empty()
            || !self.agents.is_empty()
    }
}

pub fn component(id: &str) -> Option<&'static SystemComponent> {
    SYSTEM_COMPONENTS.iter().find(|c| c.id == id)
}

const ORCHESTRATOR_CONFIG: &str = r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: recordlabel-config
data:
  LOG_LEVEL: "INFO"
  API_TIMEOUT: "30"
  # Add other common env vars here
"#;

const ORCHESTRATOR_DEPLOYMENT: &str = r#"
# Dockerfile.orchestrator
FROM python:3.11-slim
WORKDIR /app
COPY orchestrator/requirements.txt .
RUN pip install --no-cache-dir -r requirements.txt
COPY orchestrator/ .
CMD ["python", "orchestrator.py"]

# k8s-deployments.yaml (snippet for orchestrator)
apiVersion: apps/v1
kind: Deployment
metadata:
  name: orchestrator
spec:
  replicas: 1
  selector:
    matchLabels:
      app: orchestrator
  template:
    metadata:
      labels:
        app: orchestrator
    spec:
      containers:
      - name: orchestrator
        image: yourrepo/recordlabel-orchestrator:latest # Replace with actual image
        ports:
        - containerPort: 8000
        env:
        - name: LOG_LEVEL
          valueFrom:
            configMapKeyRef:
              name: recordlabel-config
              key: LOG_LEVEL
        - name: DB_PASSWORD # Example, ensure secretKeyRef is used for real secrets
          valueFrom:
            secretKeyRef:
              name: recordlabel-secrets
              key: DB_PASSWORD
"#;

pub static SYSTEM_COMPONENTS: &[SystemComponent] = &[
    SystemComponent {
        id: "ag-ui",
        name: "AG-UI Frontend",
        kind: ComponentKind::UiFrontend,
        status: ComponentStatus::Running,
        description: "The user interface for interacting with the agent system. (This application)",
        port: Some(3000),
        path: None,
        dockerfile: None,
        related_files: &["package.json", "Dockerfile.agui (conceptual)"],
        agents: &[],
        config_details: None,
        deployment_details: None,
    },
    SystemComponent {
        id: "orchestrator",
        name: "Orchestrator",
        kind: ComponentKind::Orchestrator,
        status: ComponentStatus::Running,
        description: "Manages and coordinates the different agents in the system.",
        port: Some(8000),
        path: Some("/orchestrator"),
        dockerfile: Some("Dockerfile.orchestrator"),
        related_files: &["orchestrator.py", "requirements.txt"],
        agents: &[],
        config_details: Some(ORCHESTRATOR_CONFIG),
        deployment_details: Some(ORCHESTRATOR_DEPLOYMENT),
    },
    SystemComponent {
        id: "mcp-server",
        name: "MCP Server",
        kind: ComponentKind::McpServer,
        status: ComponentStatus::Running,
        description: "Master Control Program server, possibly for external integrations or core logic.",
        port: Some(9000),
        path: Some("/mcp"),
        dockerfile: Some("Dockerfile.mcp"),
        related_files: &["mcp_server.py", "requirements.txt"],
        agents: &[],
        config_details: None,
        deployment_details: None,
    },
    SystemComponent {
        id: "agents",
        name: "Agent Services",
        kind: ComponentKind::AgentGroup,
        status: ComponentStatus::Running,
        description: "A collection of specialized agents performing various tasks.",
        port: None,
        path: None,
        dockerfile: None,
        related_files: &[
            "Dockerfile.agent.audio_analysis",
            "Dockerfile.agent.metadata",
            "audio_analysis_agent.py",
        ],
        agents: &[
            AgentDetail {
                id: "audio-analysis",
                name: "Audio Analysis Agent",
                status: ComponentStatus::Running,
                description: "Analyzes audio content.",
            },
            AgentDetail {
                id: "metadata",
                name: "Metadata Agent",
                status: ComponentStatus::Running,
                description: "Manages metadata for tracks.",
            },
            AgentDetail {
                id: "distribution",
                name: "Distribution Agent",
                status: ComponentStatus::Running,
                description: "Handles music distribution.",
            },
            AgentDetail {
                id: "marketing",
                name: "Marketing Agent",
                status: ComponentStatus::Pending,
                description: "Manages marketing campaigns.",
            },
            AgentDetail {
                id: "rights-licensing",
                name: "Rights Licensing Agent",
                status: ComponentStatus::Error,
                description: "Handles rights and licensing.",
            },
            AgentDetail {
                id: "customer-support",
                name: "Customer Support Agent",
                status: ComponentStatus::Stopped,
                description: "Provides customer support functionalities.",
            },
            AgentDetail {
                id: "analytics-reporting",
                name: "Analytics Reporting Agent",
                status: ComponentStatus::Running,
                description: "Generates analytics and reports.",
            },
        ],
        config_details: None,
        deployment_details: None,
    },
];

pub const K8S_SECRET_YAML: &str = r#"
apiVersion: v1
kind: Secret
metadata:
  name: recordlabel-secrets
type: Opaque
stringData:
  DB_PASSWORD: "your_db_password_here" # Replace with actual provisioning
  API_KEY: "your_api_key_here"       # Replace with actual provisioning
  # Add other secrets here
"#;

pub const DOCKER_COMPOSE_YAML: &str = r#"
version: '3.9'

services:
  orchestrator:
    build:
      context: .
      dockerfile: Dockerfile.orchestrator
    ports:
      - "8000:8000"
    networks:
      - recordlabel_net

  audio_analysis_agent: # Example agent
    build:
      context: .
      dockerfile: Dockerfile.agent.audio_analysis
    networks:
      - recordlabel_net

  # ... (other agents defined similarly)

  mcp_server:
    build:
      context: .
      dockerfile: Dockerfile.mcp
    ports:
      - "9000:9000"
    networks:
      - recordlabel_net

  ag_ui: # This application
    build:
      context: .
      dockerfile: Dockerfile.agui
    ports:
      - "3000:3000"
    networks:
      - recordlabel_net

networks:
  recordlabel_net:
    driver: bridge
"#;

pub const K8S_INGRESS_YAML: &str = r#"
apiVersion: networking.k8s.io/v1
kind: Ingress
metadata:
  name: recordlabel-ingress
  annotations:
    nginx.ingress.kubernetes.io/rewrite-target: /
spec:
  rules:
  - host: recordlabel.example.com # Replace with actual host
    http:
      paths:
      - path: /orchestrator
        pathType: Prefix
        backend:
          service:
            name: orchestrator-service
            port:
              number: 8000
      - path: /mcp
        pathType: Prefix
        backend:
          service:
            name: mcp-server-service
            port:
              number: 9000
      - path: /ui
        pathType: Prefix
        backend:
          service:
            name: ag-ui-service
            port:
              number: 3000
"#;

/// Syntax used to highlight a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetLanguage {
    Yaml,
    Bash,
}

impl SnippetLanguage {
    /// File extension understood by the highlighter's syntax set.
    pub fn extension(self) -> &'static str {
        match self {
            SnippetLanguage::Yaml => "yaml",
            SnippetLanguage::Bash => "sh",
        }
    }
}

/// A titled, collapsible block of reference text.
#[derive(Debug)]
pub struct Snippet {
    pub id: &'static str,
    pub title: &'static str,
    pub language: SnippetLanguage,
    pub body: &'static str,
    pub open_by_default: bool,
}

/// Configuration page panels, in display order.
pub fn configuration_snippets() -> Vec<Snippet> {
    let mut snippets = Vec::new();
    if let Some(config) = component("orchestrator").and_then(|c| c.config_details) {
        snippets.push(Snippet {
            id: "config-configmap",
            title: "Kubernetes ConfigMap (recordlabel-config)",
            language: SnippetLanguage::Yaml,
            body: config,
            open_by_default: true,
        });
    }
    snippets.extend([
        Snippet {
            id: "config-secret",
            title: "Kubernetes Secret (recordlabel-secrets)",
            language: SnippetLanguage::Yaml,
            body: K8S_SECRET_YAML,
            open_by_default: false,
        },
        Snippet {
            id: "config-compose",
            title: "Docker Compose (docker-compose.yml)",
            language: SnippetLanguage::Yaml,
            body: DOCKER_COMPOSE_YAML,
            open_by_default: false,
        },
        Snippet {
            id: "config-ingress",
            title: "Kubernetes Ingress (k8s-ingress.yaml)",
            language: SnippetLanguage::Yaml,
            body: K8S_INGRESS_YAML,
            open_by_default: false,
        },
    ]);
    snippets
}

/// Deployment page panels.
pub fn deployment_snippets() -> Vec<Snippet> {
    component("orchestrator")
        .and_then(|c| c.deployment_details)
        .map(|body| Snippet {
            id: "deploy-orchestrator",
            title: "Orchestrator Dockerfile & K8s Deployment Snippet",
            language: SnippetLanguage::Yaml,
            body,
            open_by_default: true,
        })
        .into_iter()
        .collect()
}

pub const CONFIGURATION_NOTE: &str = "The YAML content displayed here is based on the examples provided in the project documentation. \
    Actual configurations, especially secrets and image URLs, should be managed securely and updated according to your deployment environment.";

pub const DEPLOYMENT_TIP: &str = "Always refer to the latest official documentation for Docker, Kubernetes, and any specific cloud provider instructions. \
    Replace placeholders like `yourrepo/...` with your actual registry paths and configurations.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationCategory {
    LocalDockerCompose,
    KubernetesCloud,
}

impl VerificationCategory {
    pub fn label(self) -> &'static str {
        match self {
            VerificationCategory::LocalDockerCompose => "Local Docker Compose",
            VerificationCategory::KubernetesCloud => "Kubernetes Cloud",
        }
    }
}

#[derive(Debug)]
pub struct VerificationSubStep {
    pub id: &'static str,
    pub text: &'static str,
    pub status_command: Option<&'static str>,
}

#[derive(Debug)]
pub struct VerificationStep {
    pub id: &'static str,
    pub title: &'static str,
    pub category: VerificationCategory,
    pub details: &'static str,
    pub sub_steps: &'static [VerificationSubStep],
}

pub static VERIFICATION_STEPS: &[VerificationStep] = &[
    VerificationStep {
        id: "local-dev",
        title: "Local Development with Docker Compose",
        category: VerificationCategory::LocalDockerCompose,
        details: "Verify components running locally via Docker Compose.",
        sub_steps: &[
            VerificationSubStep {
                id: "lc-build",
                text: "Build and Start Containers: `docker-compose up --build`",
                status_command: None,
            },
            VerificationSubStep {
                id: "lc-agui",
                text: "AG-UI Frontend accessible (usually http://localhost:3000)",
                status_command: None,
            },
            VerificationSubStep {
                id: "lc-orchestrator",
                text: "Orchestrator API accessible (e.g., http://localhost:8000/orchestrator)",
                status_command: None,
            },
            VerificationSubStep {
                id: "lc-mcp",
                text: "MCP Server API accessible (e.g., http://localhost:9000/mcp)",
                status_command: None,
            },
            VerificationSubStep {
                id: "lc-agent-logs",
                text: "Check agent container logs for errors: `docker-compose logs <agent_service_name>`",
                status_command: None,
            },
        ],
    },
    VerificationStep {
        id: "k8s-deploy",
        title: "Cloud Deployment with Kubernetes",
        category: VerificationCategory::KubernetesCloud,
        details: "Verify components deployed and accessible in Kubernetes.",
        sub_steps: &[
            VerificationSubStep {
                id: "k8s-pods",
                text: "Check Pod Status: All pods in \"Running\" state.",
                status_command: Some("kubectl get pods"),
            },
            VerificationSubStep {
                id: "k8s-services",
                text: "Check Service Status: All services running with external IPs if applicable.",
                status_command: Some("kubectl get services"),
            },
            VerificationSubStep {
                id: "k8s-ingress",
                text: "Check Ingress Status: Ingress configured correctly.",
                status_command: Some("kubectl get ingress"),
            },
            VerificationSubStep {
                id: "k8s-access-ui",
                text: "Access AG-UI Frontend via Ingress host (e.g., http://recordlabel.example.com/ui)",
                status_command: None,
            },
            VerificationSubStep {
                id: "k8s-access-orchestrator",
                text: "Access Orchestrator API via Ingress host (e.g., http://recordlabel.example.com/orchestrator)",
                status_command: None,
            },
            VerificationSubStep {
                id: "k8s-access-mcp",
                text: "Access MCP Server API via Ingress host (e.g., http://recordlabel.example.com/mcp)",
                status_command: None,
            },
            VerificationSubStep {
                id: "k8s-agent-logs",
                text: "Check agent pod logs for communication issues: `kubectl logs <pod_name>`",
                status_command: None,
            },
        ],
    },
];

#[derive(Debug)]
pub struct Command {
    pub command: &'static str,
    pub description: &'static str,
}

pub static DOCKER_COMPOSE_COMMANDS: &[Command] = &[
    Command {
        command: "docker-compose up --build",
        description: "Builds images and starts all services defined in docker-compose.yml.",
    },
    Command {
        command: "docker-compose down",
        description: "Stops and removes containers, networks, and volumes.",
    },
    Command {
        command: "docker-compose ps",
        description: "Lists running services.",
    },
    Command {
        command: "docker-compose logs -f <service_name>",
        description: "Follows logs for a specific service.",
    },
];

pub static KUBERNETES_COMMANDS: &[Command] = &[
    Command {
        command: "kubectl apply -f k8s-configmap.yaml",
        description: "Applies the ConfigMap.",
    },
    Command {
        command: "kubectl apply -f k8s-secret.yaml",
        description: "Applies the Secret (ensure it's created securely).",
    },
    Command {
        command: "kubectl apply -f k8s-deployments.yaml",
        description: "Deploys all components defined in the deployments file.",
    },
    Command {
        command: "kubectl apply -f k8s-ingress.yaml",
        description: "Applies the Ingress rules.",
    },
    Command {
        command: "kubectl get pods -w",
        description: "Watches pod status.",
    },
    Command {
        command: "kubectl get services",
        description: "Lists all services in the current namespace.",
    },
    Command {
        command: "kubectl get ingress",
        description: "Lists all ingresses in the current namespace.",
    },
    Command {
        command: "kubectl logs <pod-name> [-c <container-name>]",
        description: "View logs for a specific pod/container.",
    },
    Command {
        command: "kubectl describe pod <pod-name>",
        description: "Get detailed information about a pod, useful for troubleshooting.",
    },
];
