//! Built-in Amazon Web Services catalog.

use super::StaticEntry;

pub(super) const ENTRIES: &[StaticEntry] = &[
    StaticEntry::new("aws-lambda", "AWS Lambda", "Compute", "Serverless functions")
        .with_aliases(&[
            "lambda",
            "lambda function",
            "lambda functions",
            "AWS::Lambda::Function",
            "aws_lambda_function",
        ]),
    StaticEntry::new("aws-ec2", "Amazon EC2", "Compute", "Resizable virtual servers")
        .with_aliases(&["ec2", "ec2 instance", "AWS::EC2::Instance", "aws_instance"]),
    StaticEntry::new(
        "aws-ecs",
        "Amazon ECS",
        "Containers",
        "Managed container orchestration",
    )
    .with_aliases(&[
        "ecs",
        "elastic container service",
        "AWS::ECS::Service",
        "AWS::ECS::Cluster",
        "aws_ecs_service",
        "aws_ecs_cluster",
    ]),
    StaticEntry::new(
        "aws-eks",
        "Amazon EKS",
        "Containers",
        "Managed Kubernetes clusters",
    )
    .with_aliases(&[
        "eks",
        "elastic kubernetes service",
        "AWS::EKS::Cluster",
        "aws_eks_cluster",
    ]),
    StaticEntry::new(
        "aws-fargate",
        "AWS Fargate",
        "Containers",
        "Serverless compute for containers",
    )
    .with_aliases(&["fargate"]),
    StaticEntry::new(
        "aws-ecr",
        "Amazon ECR",
        "Containers",
        "Container image registry",
    )
    .with_aliases(&[
        "ecr",
        "elastic container registry",
        "AWS::ECR::Repository",
        "aws_ecr_repository",
    ]),
    StaticEntry::new("aws-s3", "Amazon S3", "Storage", "Object storage")
        .with_aliases(&[
            "s3",
            "s3 bucket",
            "simple storage service",
            "AWS::S3::Bucket",
            "aws_s3_bucket",
        ]),
    StaticEntry::new(
        "aws-dynamodb",
        "Amazon DynamoDB",
        "Databases",
        "Serverless key-value and document database",
    )
    .with_aliases(&[
        "dynamodb",
        "dynamo",
        "AWS::DynamoDB::Table",
        "aws_dynamodb_table",
    ]),
    StaticEntry::new(
        "aws-rds",
        "Amazon RDS",
        "Databases",
        "Managed relational databases",
    )
    .with_aliases(&[
        "rds",
        "relational database service",
        "AWS::RDS::DBInstance",
        "aws_db_instance",
    ]),
    StaticEntry::new(
        "aws-aurora",
        "Amazon Aurora",
        "Databases",
        "Cloud-native MySQL and PostgreSQL",
    )
    .with_aliases(&["aurora", "AWS::RDS::DBCluster", "aws_rds_cluster"]),
    StaticEntry::new(
        "aws-elasticache",
        "Amazon ElastiCache",
        "Databases",
        "Managed Redis and Memcached",
    )
    .with_aliases(&[
        "elasticache",
        "redis",
        "memcached",
        "AWS::ElastiCache::CacheCluster",
        "aws_elasticache_cluster",
    ]),
    StaticEntry::new("aws-sqs", "Amazon SQS", "Integration", "Managed message queues")
        .with_aliases(&[
            "sqs",
            "simple queue service",
            "AWS::SQS::Queue",
            "aws_sqs_queue",
        ]),
    StaticEntry::new(
        "aws-sns",
        "Amazon SNS",
        "Integration",
        "Publish-subscribe notifications",
    )
    .with_aliases(&[
        "sns",
        "simple notification service",
        "AWS::SNS::Topic",
        "aws_sns_topic",
    ]),
    StaticEntry::new(
        "aws-eventbridge",
        "Amazon EventBridge",
        "Integration",
        "Serverless event bus",
    )
    .with_aliases(&[
        "eventbridge",
        "event bridge",
        "AWS::Events::Rule",
        "aws_cloudwatch_event_rule",
    ]),
    StaticEntry::new(
        "aws-kinesis",
        "Amazon Kinesis",
        "Analytics",
        "Real-time data streaming",
    )
    .with_aliases(&[
        "kinesis",
        "kinesis data streams",
        "AWS::Kinesis::Stream",
        "aws_kinesis_stream",
    ]),
    StaticEntry::new(
        "aws-step-functions",
        "AWS Step Functions",
        "Integration",
        "Visual workflows for distributed applications",
    )
    .with_aliases(&[
        "step functions",
        "state machine",
        "AWS::StepFunctions::StateMachine",
        "aws_sfn_state_machine",
    ]),
    StaticEntry::new(
        "aws-api-gateway",
        "Amazon API Gateway",
        "Networking",
        "Create, publish and secure APIs",
    )
    .with_aliases(&[
        "api gateway",
        "apigateway",
        "AWS::ApiGateway::RestApi",
        "aws_api_gateway_rest_api",
        "aws_apigatewayv2_api",
    ]),
    StaticEntry::new(
        "aws-cloudfront",
        "Amazon CloudFront",
        "Networking",
        "Global content delivery network",
    )
    .with_aliases(&[
        "cloudfront",
        "cdn",
        "AWS::CloudFront::Distribution",
        "aws_cloudfront_distribution",
    ]),
    StaticEntry::new("aws-route-53", "Amazon Route 53", "Networking", "Scalable DNS")
        .with_aliases(&[
            "route 53",
            "route53",
            "AWS::Route53::HostedZone",
            "aws_route53_zone",
        ]),
    StaticEntry::new(
        "aws-elb",
        "Elastic Load Balancing",
        "Networking",
        "Application and network load balancers",
    )
    .with_aliases(&[
        "elb",
        "alb",
        "nlb",
        "application load balancer",
        "load balancer",
        "AWS::ElasticLoadBalancingV2::LoadBalancer",
        "aws_lb",
    ]),
    StaticEntry::new(
        "aws-cognito",
        "Amazon Cognito",
        "Identity",
        "User sign-up and sign-in",
    )
    .with_aliases(&["cognito", "AWS::Cognito::UserPool", "aws_cognito_user_pool"]),
    StaticEntry::new(
        "aws-iam",
        "AWS IAM",
        "Identity",
        "Identity and access management",
    )
    .with_aliases(&[
        "iam",
        "identity and access management",
        "AWS::IAM::Role",
        "aws_iam_role",
    ]),
    StaticEntry::new(
        "aws-secrets-manager",
        "AWS Secrets Manager",
        "Security",
        "Rotate and retrieve secrets",
    )
    .with_aliases(&[
        "secrets manager",
        "AWS::SecretsManager::Secret",
        "aws_secretsmanager_secret",
    ]),
    StaticEntry::new(
        "aws-kms",
        "AWS KMS",
        "Security",
        "Managed encryption keys",
    )
    .with_aliases(&[
        "kms",
        "key management service",
        "AWS::KMS::Key",
        "aws_kms_key",
    ]),
    StaticEntry::new(
        "aws-waf",
        "AWS WAF",
        "Security",
        "Web application firewall",
    )
    .with_aliases(&["waf", "AWS::WAFv2::WebACL", "aws_wafv2_web_acl"]),
    StaticEntry::new(
        "aws-cloudwatch",
        "Amazon CloudWatch",
        "Management",
        "Observability of resources and applications",
    )
    .with_aliases(&[
        "cloudwatch",
        "AWS::CloudWatch::Alarm",
        "aws_cloudwatch_metric_alarm",
    ]),
    StaticEntry::new(
        "aws-sagemaker",
        "Amazon SageMaker",
        "AI",
        "Build, train and deploy ML models",
    )
    .with_aliases(&["sagemaker", "aws_sagemaker_endpoint"]),
    StaticEntry::new(
        "aws-bedrock",
        "Amazon Bedrock",
        "AI",
        "Hosted foundation models",
    )
    .with_aliases(&["bedrock"]),
    StaticEntry::new(
        "aws-redshift",
        "Amazon Redshift",
        "Analytics",
        "Cloud data warehouse",
    )
    .with_aliases(&["redshift", "AWS::Redshift::Cluster", "aws_redshift_cluster"]),
    StaticEntry::new("aws-glue", "AWS Glue", "Analytics", "Serverless data integration")
        .with_aliases(&["glue", "glue job", "AWS::Glue::Job", "aws_glue_job"]),
    StaticEntry::new(
        "aws-account",
        "AWS Account",
        "Management",
        "Isolation boundary for AWS resources",
    )
    .with_aliases(&["aws account"]),
    StaticEntry::new(
        "aws-vpc",
        "Amazon VPC",
        "Networking",
        "Isolated virtual network",
    )
    .with_aliases(&[
        "vpc",
        "virtual private cloud",
        "AWS::EC2::VPC",
        "aws_vpc",
    ]),
    StaticEntry::new(
        "aws-subnet",
        "AWS Subnet",
        "Networking",
        "Address range inside a VPC",
    )
    .with_aliases(&["subnet", "AWS::EC2::Subnet", "aws_subnet"]),
    StaticEntry::new(
        "aws-security-group",
        "AWS Security Group",
        "Networking",
        "Stateful instance-level firewall",
    )
    .with_aliases(&[
        "security group",
        "AWS::EC2::SecurityGroup",
        "aws_security_group",
    ]),
];
