//! Built-in Microsoft Azure catalog.

use super::StaticEntry;

pub(super) const ENTRIES: &[StaticEntry] = &[
    StaticEntry::new(
        "azure-functions",
        "Azure Functions",
        "Compute",
        "Event-driven serverless compute",
    )
    .with_aliases(&[
        "function app",
        "function apps",
        "azure function",
        "Microsoft.Web/sites/functions",
        "azurerm_function_app",
        "azurerm_linux_function_app",
        "azurerm_windows_function_app",
    ]),
    StaticEntry::new(
        "azure-app-service",
        "Azure App Service",
        "Compute",
        "Managed hosting for web applications and APIs",
    )
    .with_aliases(&[
        "app service",
        "web app",
        "web apps",
        "Microsoft.Web/sites",
        "azurerm_app_service",
        "azurerm_linux_web_app",
        "azurerm_windows_web_app",
    ]),
    StaticEntry::new(
        "azure-virtual-machines",
        "Azure Virtual Machines",
        "Compute",
        "On-demand Linux and Windows virtual machines",
    )
    .with_aliases(&[
        "virtual machine",
        "virtual machines",
        "vm",
        "vms",
        "Microsoft.Compute/virtualMachines",
        "azurerm_virtual_machine",
        "azurerm_linux_virtual_machine",
        "azurerm_windows_virtual_machine",
    ]),
    StaticEntry::new(
        "azure-kubernetes-service",
        "Azure Kubernetes Service",
        "Containers",
        "Managed Kubernetes clusters",
    )
    .with_aliases(&[
        "aks",
        "kubernetes service",
        "Microsoft.ContainerService/managedClusters",
        "azurerm_kubernetes_cluster",
    ]),
    StaticEntry::new(
        "azure-container-apps",
        "Azure Container Apps",
        "Containers",
        "Serverless containers for microservices",
    )
    .with_aliases(&[
        "container apps",
        "container app",
        "Microsoft.App/containerApps",
        "azurerm_container_app",
    ]),
    StaticEntry::new(
        "azure-container-registry",
        "Azure Container Registry",
        "Containers",
        "Private registry for container images",
    )
    .with_aliases(&[
        "acr",
        "container registry",
        "Microsoft.ContainerRegistry/registries",
        "azurerm_container_registry",
    ]),
    StaticEntry::new(
        "azure-cosmos-db",
        "Azure Cosmos DB",
        "Databases",
        "Globally distributed multi-model database",
    )
    .with_aliases(&[
        "cosmos db",
        "cosmosdb",
        "cosmos",
        "Microsoft.DocumentDB/databaseAccounts",
        "azurerm_cosmosdb_account",
    ]),
    StaticEntry::new(
        "azure-sql-database",
        "Azure SQL Database",
        "Databases",
        "Managed relational SQL database",
    )
    .with_aliases(&[
        "azure sql",
        "sql database",
        "sql db",
        "Microsoft.Sql/servers",
        "Microsoft.Sql/servers/databases",
        "azurerm_mssql_database",
        "azurerm_sql_database",
    ]),
    StaticEntry::new(
        "azure-database-for-postgresql",
        "Azure Database for PostgreSQL",
        "Databases",
        "Managed PostgreSQL database",
    )
    .with_aliases(&[
        "postgresql",
        "postgres",
        "Microsoft.DBforPostgreSQL/flexibleServers",
        "azurerm_postgresql_flexible_server",
    ]),
    StaticEntry::new(
        "azure-cache-for-redis",
        "Azure Cache for Redis",
        "Databases",
        "Managed in-memory Redis cache",
    )
    .with_aliases(&[
        "redis",
        "redis cache",
        "Microsoft.Cache/redis",
        "azurerm_redis_cache",
    ]),
    StaticEntry::new(
        "azure-storage-account",
        "Azure Storage Account",
        "Storage",
        "Durable storage for blobs, files, queues and tables",
    )
    .with_aliases(&[
        "storage account",
        "Microsoft.Storage/storageAccounts",
        "azurerm_storage_account",
    ]),
    StaticEntry::new(
        "azure-blob-storage",
        "Azure Blob Storage",
        "Storage",
        "Object storage for unstructured data",
    )
    .with_aliases(&["blob storage", "blobs", "azurerm_storage_container"]),
    StaticEntry::new(
        "azure-queue-storage",
        "Azure Queue Storage",
        "Storage",
        "Simple message queues backed by a storage account",
    )
    .with_aliases(&["storage queue", "azurerm_storage_queue"]),
    StaticEntry::new(
        "azure-service-bus",
        "Azure Service Bus",
        "Integration",
        "Enterprise message broker with queues and topics",
    )
    .with_aliases(&[
        "service bus",
        "servicebus",
        "Microsoft.ServiceBus/namespaces",
        "azurerm_servicebus_namespace",
    ]),
    StaticEntry::new(
        "azure-event-hubs",
        "Azure Event Hubs",
        "Analytics",
        "Big data streaming and event ingestion",
    )
    .with_aliases(&[
        "event hub",
        "event hubs",
        "eventhub",
        "Microsoft.EventHub/namespaces",
        "azurerm_eventhub_namespace",
    ]),
    StaticEntry::new(
        "azure-event-grid",
        "Azure Event Grid",
        "Integration",
        "Event routing with publish-subscribe delivery",
    )
    .with_aliases(&[
        "event grid",
        "Microsoft.EventGrid/topics",
        "azurerm_eventgrid_topic",
    ]),
    StaticEntry::new(
        "azure-logic-apps",
        "Azure Logic Apps",
        "Integration",
        "Low-code workflow automation",
    )
    .with_aliases(&[
        "logic app",
        "logic apps",
        "Microsoft.Logic/workflows",
        "azurerm_logic_app_workflow",
    ]),
    StaticEntry::new(
        "azure-api-management",
        "Azure API Management",
        "Integration",
        "Gateway and developer portal for APIs",
    )
    .with_aliases(&[
        "apim",
        "api management",
        "Microsoft.ApiManagement/service",
        "azurerm_api_management",
    ]),
    StaticEntry::new(
        "azure-application-gateway",
        "Azure Application Gateway",
        "Networking",
        "Layer 7 load balancer with web application firewall",
    )
    .with_aliases(&[
        "application gateway",
        "app gateway",
        "Microsoft.Network/applicationGateways",
        "azurerm_application_gateway",
    ]),
    StaticEntry::new(
        "azure-front-door",
        "Azure Front Door",
        "Networking",
        "Global entry point with CDN and WAF",
    )
    .with_aliases(&[
        "front door",
        "frontdoor",
        "Microsoft.Cdn/profiles",
        "azurerm_cdn_frontdoor_profile",
    ]),
    StaticEntry::new(
        "azure-load-balancer",
        "Azure Load Balancer",
        "Networking",
        "Layer 4 load balancing",
    )
    .with_aliases(&[
        "load balancer",
        "Microsoft.Network/loadBalancers",
        "azurerm_lb",
    ]),
    StaticEntry::new(
        "azure-vpn-gateway",
        "Azure VPN Gateway",
        "Networking",
        "Site-to-site and point-to-site VPN connectivity",
    )
    .with_aliases(&[
        "vpn gateway",
        "Microsoft.Network/virtualNetworkGateways",
        "azurerm_virtual_network_gateway",
    ]),
    StaticEntry::new(
        "azure-cdn",
        "Azure CDN",
        "Networking",
        "Content delivery network",
    )
    .with_aliases(&["cdn", "azurerm_cdn_profile"]),
    StaticEntry::new(
        "azure-dns",
        "Azure DNS",
        "Networking",
        "Hosting for DNS domains",
    )
    .with_aliases(&["dns zone", "Microsoft.Network/dnsZones", "azurerm_dns_zone"]),
    StaticEntry::new(
        "azure-firewall",
        "Azure Firewall",
        "Security",
        "Managed network firewall",
    )
    .with_aliases(&[
        "firewall",
        "Microsoft.Network/azureFirewalls",
        "azurerm_firewall",
    ]),
    StaticEntry::new(
        "azure-key-vault",
        "Azure Key Vault",
        "Security",
        "Secrets, keys and certificate management",
    )
    .with_aliases(&[
        "key vault",
        "keyvault",
        "Microsoft.KeyVault/vaults",
        "azurerm_key_vault",
    ]),
    StaticEntry::new(
        "azure-entra-id",
        "Microsoft Entra ID",
        "Identity",
        "Cloud identity and access management",
    )
    .with_aliases(&[
        "entra id",
        "entra",
        "azure ad",
        "azure active directory",
        "active directory",
        "aad",
    ]),
    StaticEntry::new(
        "azure-monitor",
        "Azure Monitor",
        "Management",
        "Metrics, logs and alerting",
    )
    .with_aliases(&[
        "log analytics",
        "log analytics workspace",
        "Microsoft.OperationalInsights/workspaces",
        "azurerm_log_analytics_workspace",
    ]),
    StaticEntry::new(
        "azure-application-insights",
        "Azure Application Insights",
        "Management",
        "Application performance monitoring",
    )
    .with_aliases(&[
        "application insights",
        "app insights",
        "Microsoft.Insights/components",
        "azurerm_application_insights",
    ]),
    StaticEntry::new(
        "azure-openai",
        "Azure OpenAI",
        "AI",
        "Hosted OpenAI language models",
    )
    .with_aliases(&[
        "openai",
        "azure openai service",
        "Microsoft.CognitiveServices/accounts",
        "azurerm_cognitive_account",
    ]),
    StaticEntry::new(
        "azure-ai-search",
        "Azure AI Search",
        "AI",
        "Full-text and vector search",
    )
    .with_aliases(&[
        "cognitive search",
        "ai search",
        "Microsoft.Search/searchServices",
        "azurerm_search_service",
    ]),
    StaticEntry::new(
        "azure-data-factory",
        "Azure Data Factory",
        "Analytics",
        "Data integration pipelines",
    )
    .with_aliases(&[
        "data factory",
        "adf",
        "Microsoft.DataFactory/factories",
        "azurerm_data_factory",
    ]),
    StaticEntry::new(
        "azure-synapse-analytics",
        "Azure Synapse Analytics",
        "Analytics",
        "Data warehousing and big data analytics",
    )
    .with_aliases(&[
        "synapse",
        "Microsoft.Synapse/workspaces",
        "azurerm_synapse_workspace",
    ]),
    StaticEntry::new(
        "azure-static-web-apps",
        "Azure Static Web Apps",
        "Web",
        "Static front ends with serverless APIs",
    )
    .with_aliases(&[
        "static web app",
        "static web apps",
        "Microsoft.Web/staticSites",
        "azurerm_static_site",
    ]),
    StaticEntry::new(
        "azure-management-group",
        "Azure Management Group",
        "Management",
        "Governance scope above subscriptions",
    )
    .with_aliases(&[
        "management group",
        "Microsoft.Management/managementGroups",
        "azurerm_management_group",
    ]),
    StaticEntry::new(
        "azure-subscription",
        "Azure Subscription",
        "Management",
        "Billing and access boundary for resources",
    )
    .with_aliases(&["subscription", "azurerm_subscription"]),
    StaticEntry::new(
        "azure-resource-group",
        "Azure Resource Group",
        "Management",
        "Logical container for related resources",
    )
    .with_aliases(&[
        "resource group",
        "Microsoft.Resources/resourceGroups",
        "azurerm_resource_group",
    ]),
    StaticEntry::new(
        "azure-virtual-network",
        "Azure Virtual Network",
        "Networking",
        "Private network for Azure resources",
    )
    .with_aliases(&[
        "virtual network",
        "vnet",
        "Microsoft.Network/virtualNetworks",
        "azurerm_virtual_network",
    ]),
    StaticEntry::new(
        "azure-subnet",
        "Azure Subnet",
        "Networking",
        "Address range inside a virtual network",
    )
    .with_aliases(&[
        "subnet",
        "Microsoft.Network/virtualNetworks/subnets",
        "azurerm_subnet",
    ]),
    StaticEntry::new(
        "azure-network-security-group",
        "Azure Network Security Group",
        "Networking",
        "Inbound and outbound traffic rules",
    )
    .with_aliases(&[
        "network security group",
        "nsg",
        "Microsoft.Network/networkSecurityGroups",
        "azurerm_network_security_group",
    ]),
];
