//! Built-in Google Cloud catalog.

use super::StaticEntry;

pub(super) const ENTRIES: &[StaticEntry] = &[
    StaticEntry::new(
        "gcp-cloud-functions",
        "Cloud Functions",
        "Compute",
        "Event-driven serverless functions",
    )
    .with_aliases(&[
        "cloud function",
        "google_cloudfunctions_function",
        "google_cloudfunctions2_function",
    ]),
    StaticEntry::new(
        "gcp-cloud-run",
        "Cloud Run",
        "Compute",
        "Serverless containers",
    )
    .with_aliases(&["google_cloud_run_service", "google_cloud_run_v2_service"]),
    StaticEntry::new(
        "gcp-compute-engine",
        "Compute Engine",
        "Compute",
        "Virtual machines on Google infrastructure",
    )
    .with_aliases(&["gce", "google_compute_instance"]),
    StaticEntry::new(
        "gcp-gke",
        "Google Kubernetes Engine",
        "Containers",
        "Managed Kubernetes clusters",
    )
    .with_aliases(&["gke", "kubernetes engine", "google_container_cluster"]),
    StaticEntry::new(
        "gcp-app-engine",
        "App Engine",
        "Compute",
        "Fully managed application platform",
    )
    .with_aliases(&["google_app_engine_application"]),
    StaticEntry::new(
        "gcp-artifact-registry",
        "Artifact Registry",
        "Containers",
        "Package and container image registry",
    )
    .with_aliases(&["google_artifact_registry_repository"]),
    StaticEntry::new(
        "gcp-cloud-storage",
        "Cloud Storage",
        "Storage",
        "Object storage",
    )
    .with_aliases(&["gcs", "gcs bucket", "google_storage_bucket"]),
    StaticEntry::new(
        "gcp-firestore",
        "Firestore",
        "Databases",
        "Serverless document database",
    )
    .with_aliases(&["google_firestore_database"]),
    StaticEntry::new(
        "gcp-bigtable",
        "Cloud Bigtable",
        "Databases",
        "Wide-column NoSQL database",
    )
    .with_aliases(&["bigtable", "google_bigtable_instance"]),
    StaticEntry::new(
        "gcp-cloud-sql",
        "Cloud SQL",
        "Databases",
        "Managed MySQL, PostgreSQL and SQL Server",
    )
    .with_aliases(&["google_sql_database_instance"]),
    StaticEntry::new(
        "gcp-spanner",
        "Cloud Spanner",
        "Databases",
        "Globally consistent relational database",
    )
    .with_aliases(&["spanner", "google_spanner_instance"]),
    StaticEntry::new(
        "gcp-memorystore",
        "Memorystore",
        "Databases",
        "Managed Redis and Memcached",
    )
    .with_aliases(&["redis", "google_redis_instance"]),
    StaticEntry::new(
        "gcp-bigquery",
        "BigQuery",
        "Analytics",
        "Serverless data warehouse",
    )
    .with_aliases(&["big query", "google_bigquery_dataset"]),
    StaticEntry::new(
        "gcp-pubsub",
        "Pub/Sub",
        "Integration",
        "Global messaging and event ingestion",
    )
    .with_aliases(&["pubsub", "cloud pub sub", "google_pubsub_topic"]),
    StaticEntry::new(
        "gcp-dataflow",
        "Dataflow",
        "Analytics",
        "Stream and batch data processing",
    )
    .with_aliases(&["google_dataflow_job"]),
    StaticEntry::new(
        "gcp-api-gateway",
        "Google Cloud API Gateway",
        "Networking",
        "Managed gateway for serverless backends",
    )
    .with_aliases(&["api gateway", "google_api_gateway_gateway"]),
    StaticEntry::new(
        "gcp-load-balancing",
        "Cloud Load Balancing",
        "Networking",
        "Global load balancing",
    )
    .with_aliases(&["load balancer", "google_compute_backend_service"]),
    StaticEntry::new(
        "gcp-cloud-cdn",
        "Cloud CDN",
        "Networking",
        "Content delivery on Google's edge",
    )
    .with_aliases(&["cdn"]),
    StaticEntry::new(
        "gcp-cloud-dns",
        "Cloud DNS",
        "Networking",
        "Managed authoritative DNS",
    )
    .with_aliases(&["google_dns_managed_zone"]),
    StaticEntry::new(
        "gcp-cloud-armor",
        "Cloud Armor",
        "Security",
        "DDoS protection and web application firewall",
    )
    .with_aliases(&["google_compute_security_policy"]),
    StaticEntry::new(
        "gcp-secret-manager",
        "Secret Manager",
        "Security",
        "Store and access secrets",
    )
    .with_aliases(&["google_secret_manager_secret"]),
    StaticEntry::new(
        "gcp-cloud-kms",
        "Cloud KMS",
        "Security",
        "Managed encryption keys",
    )
    .with_aliases(&["kms", "google_kms_key_ring"]),
    StaticEntry::new(
        "gcp-identity-platform",
        "Identity Platform",
        "Identity",
        "Customer identity and access management",
    )
    .with_aliases(&["firebase auth", "firebase authentication"]),
    StaticEntry::new(
        "gcp-vertex-ai",
        "Vertex AI",
        "AI",
        "Machine learning platform",
    )
    .with_aliases(&["vertex", "google_vertex_ai_endpoint"]),
    StaticEntry::new(
        "gcp-cloud-monitoring",
        "Cloud Monitoring",
        "Management",
        "Metrics, dashboards and alerting",
    )
    .with_aliases(&["stackdriver"]),
    StaticEntry::new(
        "gcp-cloud-scheduler",
        "Cloud Scheduler",
        "Integration",
        "Managed cron jobs",
    )
    .with_aliases(&["google_cloud_scheduler_job"]),
    StaticEntry::new(
        "gcp-project",
        "Google Cloud Project",
        "Management",
        "Organizing entity for Google Cloud resources",
    )
    .with_aliases(&["gcp project", "google_project"]),
    StaticEntry::new(
        "gcp-vpc-network",
        "VPC Network",
        "Networking",
        "Global virtual private cloud network",
    )
    .with_aliases(&["vpc network", "google_compute_network"]),
    StaticEntry::new(
        "gcp-subnetwork",
        "VPC Subnetwork",
        "Networking",
        "Regional address range of a VPC network",
    )
    .with_aliases(&["subnetwork", "google_compute_subnetwork"]),
];
